#![allow(missing_docs)]

use std::sync::OnceLock;

use fixor_common::{Config, GateKind, PhaseBudget};
use fixor_sim::{Graph, NodeId, PinRef, SimError};
use rstest::rstest;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Board {
    graph: Graph,
    a: NodeId,
    b: NodeId,
    gate: NodeId,
    sink: NodeId,
}

/// Two sources into a two-input gate into one sink.
fn two_input_board(kind: GateKind, config: Config) -> Board {
    let mut graph = Graph::new(config);
    let a = graph.create_input_source();
    let b = graph.create_input_source();
    let gate = graph.create_gate(kind).unwrap();
    let sink = graph.create_output_sink();
    graph
        .connect(PinRef::output(a, 0), PinRef::input(gate, 0))
        .unwrap();
    graph
        .connect(PinRef::output(b, 0), PinRef::input(gate, 1))
        .unwrap();
    graph
        .connect(PinRef::output(gate, 0), PinRef::input(sink, 0))
        .unwrap();
    Board {
        graph,
        a,
        b,
        gate,
        sink,
    }
}

/// One source through a NOT into one sink.
fn inverter_board() -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::default();
    let source = graph.create_input_source();
    let not = graph.create_gate(GateKind::Not).unwrap();
    let sink = graph.create_output_sink();
    graph
        .connect(PinRef::output(source, 0), PinRef::input(not, 0))
        .unwrap();
    graph
        .connect(PinRef::output(not, 0), PinRef::input(sink, 0))
        .unwrap();
    graph.tick();
    (graph, source, sink)
}

#[test]
fn and_scenario() {
    init_test_logger();
    let Board {
        mut graph, a, b, sink, ..
    } = two_input_board(GateKind::And, Config::default());

    graph.tick();
    assert!(!graph.node_state(sink).unwrap());

    graph.toggle_input(a).unwrap();
    graph.tick();
    assert!(!graph.node_state(sink).unwrap());

    graph.toggle_input(b).unwrap();
    graph.tick();
    assert!(graph.node_state(sink).unwrap());
}

#[rstest]
#[case(GateKind::And, [false, false, false, true])]
#[case(GateKind::Or, [false, true, true, true])]
#[case(GateKind::Xor, [false, true, true, false])]
#[case(GateKind::Nand, [true, true, true, false])]
#[case(GateKind::Nor, [true, false, false, false])]
fn live_gates_follow_their_tables(#[case] kind: GateKind, #[case] expected: [bool; 4]) {
    let Board {
        mut graph, a, b, sink, ..
    } = two_input_board(kind, Config::default());
    for (combination, want) in expected.into_iter().enumerate() {
        graph.set_input(a, combination & 1 == 1).unwrap();
        graph.set_input(b, combination & 2 == 2).unwrap();
        graph.tick();
        assert_eq!(graph.node_state(sink).unwrap(), want, "{kind} @ {combination}");
    }
}

#[test]
fn not_scenario() {
    let (mut graph, source, sink) = inverter_board();
    assert!(graph.node_state(sink).unwrap());
    graph.toggle_input(source).unwrap();
    graph.tick();
    assert!(!graph.node_state(sink).unwrap());
}

#[test]
fn toggling_twice_restores_outputs() {
    let (mut graph, source, sink) = inverter_board();
    let before = graph.sink_states();

    graph.toggle_input(source).unwrap();
    graph.toggle_input(source).unwrap();
    graph.tick();
    assert_eq!(graph.sink_states(), before);

    graph.toggle_input(source).unwrap();
    graph.tick();
    graph.toggle_input(source).unwrap();
    graph.tick();
    assert_eq!(graph.sink_states(), before);
    assert!(graph.node_state(sink).unwrap());
}

#[test]
fn settled_tick_does_nothing() {
    let Board {
        mut graph, a, b, gate, sink,
    } = two_input_board(GateKind::Xor, Config::default());
    graph.toggle_input(a).unwrap();
    graph.tick();
    assert!(graph.is_settled());

    let states: Vec<bool> = [a, b, gate, sink]
        .iter()
        .map(|&n| graph.node_state(n).unwrap())
        .collect();
    let stats = graph.tick();
    assert_eq!(stats.evaluations, 0);
    assert!(stats.settled);
    let again: Vec<bool> = [a, b, gate, sink]
        .iter()
        .map(|&n| graph.node_state(n).unwrap())
        .collect();
    assert_eq!(states, again);
}

#[test]
fn structural_changes_wait_for_tick() {
    init_test_logger();
    let mut graph = Graph::default();
    let source = graph.create_input_source();
    graph.toggle_input(source).unwrap();
    graph.tick();

    let not = graph.create_gate(GateKind::Not).unwrap();
    let sink = graph.create_output_sink();
    graph
        .connect(PinRef::output(not, 0), PinRef::input(sink, 0))
        .unwrap();
    // The wire copies the gate's value onto the pin, but the sink has not latched it.
    assert!(graph.pin(PinRef::input(sink, 0)).unwrap().state());
    assert!(!graph.node_state(sink).unwrap());

    graph
        .connect(PinRef::output(source, 0), PinRef::input(not, 0))
        .unwrap();
    assert!(graph.node_state(not).unwrap());
    assert!(!graph.is_settled());

    graph.tick();
    assert!(!graph.node_state(not).unwrap());
    assert!(!graph.node_state(sink).unwrap());
}

#[test]
fn single_wire_into_nand_acts_as_not() {
    let mut lone = Graph::default();
    let s1 = lone.create_input_source();
    let g1 = lone.create_gate(GateKind::Nand).unwrap();
    let k1 = lone.create_output_sink();
    lone.connect(PinRef::output(s1, 0), PinRef::input(g1, 0))
        .unwrap();
    lone.connect(PinRef::output(g1, 0), PinRef::input(k1, 0))
        .unwrap();

    let mut both = Graph::default();
    let s2 = both.create_input_source();
    let g2 = both.create_gate(GateKind::Nand).unwrap();
    let k2 = both.create_output_sink();
    both.connect(PinRef::output(s2, 0), PinRef::input(g2, 0))
        .unwrap();
    both.connect(PinRef::output(s2, 0), PinRef::input(g2, 1))
        .unwrap();
    both.connect(PinRef::output(g2, 0), PinRef::input(k2, 0))
        .unwrap();

    for value in [false, true, false] {
        lone.set_input(s1, value).unwrap();
        both.set_input(s2, value).unwrap();
        lone.tick();
        both.tick();
        assert_eq!(lone.node_state(k1).unwrap(), !value);
        assert_eq!(both.node_state(k2).unwrap(), !value);
    }
}

#[test]
fn inverter_loop_keeps_oscillating() {
    init_test_logger();
    let mut graph = Graph::default();
    let not = graph.create_gate(GateKind::Not).unwrap();
    graph
        .connect(PinRef::output(not, 0), PinRef::input(not, 0))
        .unwrap();

    for _ in 0..3 {
        let stats = graph.tick();
        // One gate plus one wire.
        assert_eq!(stats.phases, 2);
        assert_eq!(stats.evaluations, 2);
        assert!(!stats.settled);
        assert_eq!(graph.pending(), 1);
    }
}

#[test]
fn odd_budget_makes_loop_alternate_between_ticks() {
    let mut graph = Graph::new(Config::default().with_phase_budget(PhaseBudget::Fixed(3)));
    let not = graph.create_gate(GateKind::Not).unwrap();
    graph
        .connect(PinRef::output(not, 0), PinRef::input(not, 0))
        .unwrap();

    let seen: Vec<bool> = (0..4)
        .map(|_| {
            graph.tick();
            graph.node_state(not).unwrap()
        })
        .collect();
    assert_eq!(seen, vec![false, true, false, true]);
    assert_eq!(graph.run_until_settled(5), 5);
}

#[test]
fn destroyed_node_in_queue_is_skipped() {
    let mut graph = Graph::new(Config::default().with_phase_budget(PhaseBudget::Fixed(1)));
    let source = graph.create_input_source();
    let gate = graph.create_gate(GateKind::Or).unwrap();
    let sink = graph.create_output_sink();
    graph
        .connect(PinRef::output(source, 0), PinRef::input(gate, 0))
        .unwrap();
    graph
        .connect(PinRef::output(gate, 0), PinRef::input(sink, 0))
        .unwrap();
    graph.run_until_settled(10);

    graph.toggle_input(source).unwrap();
    graph.tick();
    assert!(!graph.is_settled());

    graph.destroy_node(gate).unwrap();
    graph.run_until_settled(10);
    assert!(graph.is_settled());
    assert!(!graph.node_state(sink).unwrap());
    assert!(matches!(
        graph.node_state(gate),
        Err(SimError::StaleNode(id)) if id == gate
    ));
}

#[rstest]
#[case::input_to_input(true, false)]
#[case::output_to_output(false, true)]
#[case::input_to_output(true, true)]
fn miswired_pins_are_rejected(#[case] from_input: bool, #[case] to_output: bool) {
    let Board {
        mut graph, a, gate, sink, ..
    } = two_input_board(GateKind::And, Config::default());
    let wires = graph.wire_count();
    let from = if from_input {
        PinRef::input(sink, 0)
    } else {
        PinRef::output(a, 0)
    };
    let to = if to_output {
        PinRef::output(gate, 0)
    } else {
        PinRef::input(gate, 0)
    };
    assert!(matches!(
        graph.connect(from, to),
        Err(SimError::InvalidConnection { .. })
    ));
    assert_eq!(graph.wire_count(), wires);
}

#[test]
fn missing_pin_is_reported() {
    let mut graph = Graph::default();
    let source = graph.create_input_source();
    let not = graph.create_gate(GateKind::Not).unwrap();
    let to = PinRef::input(not, 1);
    assert!(matches!(
        graph.connect(PinRef::output(source, 0), to),
        Err(SimError::NoSuchPin(pin)) if pin == to
    ));
}

#[test]
fn new_wire_displaces_old_driver() {
    let mut graph = Graph::default();
    let a = graph.create_input_source();
    let b = graph.create_input_source();
    let sink = graph.create_output_sink();
    let first = graph
        .connect(PinRef::output(a, 0), PinRef::input(sink, 0))
        .unwrap();
    let second = graph
        .connect(PinRef::output(b, 0), PinRef::input(sink, 0))
        .unwrap();

    assert_eq!(graph.wire_count(), 1);
    assert!(graph.wire(first).is_none());
    assert_eq!(graph.wire(second).unwrap().from(), PinRef::output(b, 0));
    assert!(graph.pin(PinRef::output(a, 0)).unwrap().wires().is_empty());

    graph.toggle_input(a).unwrap();
    graph.tick();
    assert!(!graph.node_state(sink).unwrap());
    graph.toggle_input(b).unwrap();
    graph.tick();
    assert!(graph.node_state(sink).unwrap());
}

#[test]
fn disconnect_pulls_input_low() {
    let mut graph = Graph::default();
    let source = graph.create_input_source();
    graph.toggle_input(source).unwrap();
    graph.tick();
    let sink = graph.create_output_sink();
    let wire = graph
        .connect(PinRef::output(source, 0), PinRef::input(sink, 0))
        .unwrap();
    graph.tick();
    assert!(graph.node_state(sink).unwrap());

    graph.disconnect(wire).unwrap();
    assert!(!graph.pin(PinRef::input(sink, 0)).unwrap().state());
    assert!(graph.node_state(sink).unwrap());
    graph.tick();
    assert!(!graph.node_state(sink).unwrap());

    assert!(matches!(
        graph.disconnect(wire),
        Err(SimError::StaleWire(w)) if w == wire
    ));
}

#[test]
fn reused_slot_does_not_revive_old_handle() {
    let mut graph = Graph::default();
    let old = graph.create_output_sink();
    graph.destroy_node(old).unwrap();
    let new = graph.create_output_sink();
    assert_ne!(old, new);
    assert!(graph.node(old).is_none());
    assert!(graph.node(new).is_some());
    assert!(matches!(graph.toggle_input(old), Err(SimError::StaleNode(_))));
}
