//! Property and scenario tests for network generation.
//!
//! Run with: cargo test -p pipe-gen --test generation_properties

#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use hashbrown::HashSet;
use pipe_gen::{
    CompletionCase, CouplerElbowWeights, DegreeDistribution, DegreeSampler, GeneratorConfig,
    PipeGenerator, PipeGraph, Termination, generate_network, reconcile,
};
use pipe_types::{Direction, LatticeCoord, Node, NodeId, NodeTable, PortSet};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// =============================================================================
// Strategies
// =============================================================================

fn arb_degrees() -> impl Strategy<Value = DegreeDistribution> {
    prop_oneof![
        Just(DegreeDistribution::default()),
        Just(DegreeDistribution::two_to_six()),
        (1usize..=6).prop_map(DegreeDistribution::fixed),
    ]
}

fn arb_config() -> impl Strategy<Value = GeneratorConfig> {
    (
        1usize..250,
        any::<bool>(),
        any::<u64>(),
        arb_degrees(),
        any::<bool>(),
    )
        .prop_map(|(nodes, tree, seed, degrees, special)| {
            GeneratorConfig::new(nodes)
                .with_tree_mode(tree)
                .with_seed(seed)
                .with_degrees(degrees)
                .with_special_cases(special)
        })
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_node_is_finalized(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        for (_, node) in generation.table.iter() {
            prop_assert!(node.active().is_disjoint(node.closed()));
            prop_assert!(node.active().union(node.closed()).is_full());
        }
    }

    #[test]
    fn prop_positions_are_unique(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        let positions: HashSet<_> = generation.table.iter().map(|(_, n)| n.position()).collect();
        prop_assert_eq!(positions.len(), generation.table.len());
        for (id, node) in generation.table.iter() {
            prop_assert_eq!(generation.table.id_at(node.position()), Some(id));
        }
    }

    #[test]
    fn prop_edges_are_mutual(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        let graph = PipeGraph::from_table(&generation.table);
        prop_assert!(graph.is_reciprocal());
        for &(u, v) in graph.edges() {
            prop_assert!(u < v);
            let a = generation.table.get(u).unwrap();
            let b = generation.table.get(v).unwrap();
            let d = a.position().direction_to(b.position()).unwrap();
            prop_assert!(a.active().contains(d));
            prop_assert!(b.active().contains(d.opposite()));
        }
    }

    #[test]
    fn prop_network_is_connected(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        let graph = PipeGraph::from_table(&generation.table);
        prop_assert_eq!(graph.component_count(), 1);
    }

    #[test]
    fn prop_tree_mode_is_acyclic(config in arb_config()) {
        let config = config.with_tree_mode(true);
        let generation = generate_network(&config).unwrap();
        let graph = PipeGraph::from_table(&generation.table);
        prop_assert!(graph.is_forest());
        prop_assert_eq!(
            graph.edge_count(),
            graph.node_count() - graph.component_count()
        );
    }

    #[test]
    fn prop_budget_and_termination(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        let len = generation.table.len();
        prop_assert!(len >= 1);
        prop_assert!(len <= config.num_nodes());
        match generation.termination {
            Termination::NodeBudgetReached => prop_assert_eq!(len, config.num_nodes()),
            Termination::FrontierExhausted => prop_assert!(len < config.num_nodes()),
        }
        prop_assert_eq!(generation.stats.nodes, len);
    }

    #[test]
    fn prop_degree_reachability(config in arb_config()) {
        let generation = generate_network(&config).unwrap();
        for record in &generation.records {
            let active = record.active();
            let forced = record.forced.active.len();
            if record.completion.case == CompletionCase::Saturated {
                prop_assert!(active.len() < record.target_degree);
                prop_assert_eq!(active.len(), forced + record.completion.selectable);
            } else {
                prop_assert_eq!(active.len(), record.target_degree.max(forced));
            }
            // Later placements may only close ports, never open them.
            let node = generation.table.get(record.id).unwrap();
            prop_assert_eq!(node.active().difference(active), PortSet::empty());
        }
    }

    #[test]
    fn prop_same_seed_same_network(config in arb_config()) {
        let a = generate_network(&config).unwrap();
        let b = generate_network(&config).unwrap();
        prop_assert_eq!(a.table, b.table);
        prop_assert_eq!(a.records, b.records);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn single_node_run() {
    for seed in 0..32 {
        let generation = generate_network(&GeneratorConfig::new(1).with_seed(seed)).unwrap();
        assert_eq!(generation.table.len(), 1);
        let node = generation.table.get(NodeId::new(0)).unwrap();
        assert_eq!(node.position(), LatticeCoord::origin());
        assert!((1..=6).contains(&node.active().len()));
        assert_eq!(node.active().len(), generation.records[0].target_degree);
        assert_eq!(node.closed(), node.active().complement());
        assert_eq!(PipeGraph::from_table(&generation.table).edge_count(), 0);
    }
}

#[test]
fn two_node_run_inherits_the_link() {
    let mut saw_pos_x = false;
    for seed in 0..64 {
        let config = GeneratorConfig::new(2)
            .with_degrees(DegreeDistribution::fixed(1))
            .with_seed(seed);
        let generation = generate_network(&config).unwrap();
        assert_eq!(generation.table.len(), 2);

        let origin = generation.table.get(NodeId::new(0)).unwrap();
        let d = origin.active().iter().next().unwrap();
        assert_eq!(origin.active(), PortSet::single(d));
        saw_pos_x |= d == Direction::PosX;

        let second = generation.table.get(NodeId::new(1)).unwrap();
        assert_eq!(Some(second.position()), LatticeCoord::origin().checked_step(d));
        assert!(generation.records[1].forced.active.contains(d.opposite()));
        assert!(second.active().contains(d.opposite()));

        let graph = PipeGraph::from_table(&generation.table);
        assert_eq!(graph.edges(), &[(NodeId::new(0), NodeId::new(1))]);
    }
    assert!(saw_pos_x);
}

#[test]
fn tree_mode_breaks_a_ring() {
    let generator = PipeGenerator::new(
        GeneratorConfig::new(4)
            .with_tree_mode(true)
            .with_degrees(DegreeDistribution::fixed(2)),
    )
    .unwrap();

    for seed in 0..16 {
        let mut table = NodeTable::new();
        let a = table
            .insert(Node::finalized(
                LatticeCoord::new(0, 0, 0),
                PortSet::from([Direction::PosX, Direction::PosY]),
            ))
            .unwrap();
        let b = table
            .insert(Node::finalized(
                LatticeCoord::new(1, 0, 0),
                PortSet::from([Direction::NegX, Direction::PosY]),
            ))
            .unwrap();
        let c = table
            .insert(Node::finalized(
                LatticeCoord::new(0, 1, 0),
                PortSet::from([Direction::NegY, Direction::PosX]),
            ))
            .unwrap();

        let last = LatticeCoord::new(1, 1, 0);
        assert_eq!(
            reconcile(last, &table).active,
            PortSet::from([Direction::NegX, Direction::NegY])
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let record = generator.place_node(last, &mut table, &mut rng).unwrap();
        assert_eq!(record.forced.active.len(), 1);
        assert_eq!(record.severed.len(), 1);

        let severed = record.severed.iter().next().unwrap();
        let (cut, kept) = if severed == Direction::NegY { (b, c) } else { (c, b) };
        let cut_node = table.get(cut).unwrap();
        assert!(cut_node.closed().contains(severed.opposite()));
        assert!(!cut_node.active().contains(severed.opposite()));
        assert!(table.get(kept).unwrap().active().len() == 2);
        assert_eq!(table.get(a).unwrap().active().len(), 2);

        let graph = PipeGraph::from_table(&table);
        assert!(graph.is_forest());
        assert!(graph.is_reciprocal());
        assert_eq!(graph.edge_count(), 3);
    }
}

#[test]
fn forced_coupler_goes_straight() {
    let generator = PipeGenerator::new(
        GeneratorConfig::new(2)
            .with_degrees(DegreeDistribution::fixed(2))
            .with_coupler_elbow(CouplerElbowWeights::always_coupler()),
    )
    .unwrap();
    let mut table = NodeTable::new();
    table
        .insert(Node::finalized(
            LatticeCoord::origin(),
            PortSet::single(Direction::PosZ),
        ))
        .unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let record = generator
        .place_node(LatticeCoord::new(0, 0, 1), &mut table, &mut rng)
        .unwrap();
    assert_eq!(record.completion.case, CompletionCase::Coupler);
    assert_eq!(record.completion.opened, PortSet::single(Direction::PosZ));
    assert_eq!(
        record.active(),
        PortSet::from([Direction::NegZ, Direction::PosZ])
    );
}

#[test]
fn elbow_rate_follows_weights() {
    let config = GeneratorConfig::new(400)
        .with_degrees(DegreeDistribution::fixed(2))
        .with_coupler_elbow(CouplerElbowWeights::new(1.0, 1.0))
        .with_seed(99);
    let generation = generate_network(&config).unwrap();
    let decided = generation.stats.couplers + generation.stats.elbows;
    assert!(decided > 100);
    #[allow(clippy::cast_precision_loss)]
    let rate = generation.stats.couplers as f64 / decided as f64;
    assert_abs_diff_eq!(rate, 0.5, epsilon = 0.15);
}

#[test]
fn degree_sampler_matches_weights() {
    let distribution = DegreeDistribution::default();
    let sampler = DegreeSampler::new(&distribution).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let draws = 20_000;
    let mut counts = [0usize; 7];
    for _ in 0..draws {
        counts[sampler.sample(&mut rng)] += 1;
    }
    assert_eq!(counts[0], 0);
    for (degree, weight) in distribution.iter() {
        #[allow(clippy::cast_precision_loss)]
        let freq = counts[degree] as f64 / f64::from(draws);
        assert_abs_diff_eq!(freq, weight, epsilon = 0.02);
    }
}
