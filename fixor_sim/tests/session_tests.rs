#![allow(missing_docs)]

use fixor_analysis::AnalysisError;
use fixor_common::{Config, GateKind, GraphDescription, Level};
use fixor_sim::{PinRef, Session, SimError, Spawnable};
use rstest::rstest;

const NAND_LEVEL: &str = include_str!("../../fixtures/levels/and_from_nand.json");

fn and_level() -> Level {
    let solution = GraphDescription::new(2, vec![GateKind::And], 1)
        .with_edges(&[(0, 2), (1, 2), (2, 3)])
        .unwrap();
    let provided = GraphDescription::new(2, vec![], 1);
    Level::new(solution, provided)
}

#[test]
fn target_table_is_the_solution_string() {
    let session = Session::new(and_level(), Config::default()).unwrap();
    assert_eq!(
        session.target_table().unwrap(),
        "A B |  OA\nF F |  F\nT F |  F\nF T |  F\nT T |  T\n"
    );
}

#[test]
fn wiring_an_and_gate_solves_the_level() {
    let mut session = Session::new(and_level(), Config::default()).unwrap();
    assert!(!session.verify().unwrap());

    let gate = session.spawn_gate(GateKind::And).unwrap();
    let graph = session.graph_mut();
    let sources: Vec<_> = graph.sources().collect();
    let sink = graph.sinks().next().unwrap();
    graph
        .connect(PinRef::output(sources[0], 0), PinRef::input(gate, 0))
        .unwrap();
    graph
        .connect(PinRef::output(sources[1], 0), PinRef::input(gate, 1))
        .unwrap();
    graph
        .connect(PinRef::output(gate, 0), PinRef::input(sink, 0))
        .unwrap();

    assert!(session.verify().unwrap());
    assert_eq!(
        session.current_table().unwrap(),
        session.target_table().unwrap()
    );
}

#[test]
fn wrong_gate_fails_verification() {
    let mut session = Session::new(and_level(), Config::default()).unwrap();
    let gate = session.spawn_gate(GateKind::Or).unwrap();
    let graph = session.graph_mut();
    let sources: Vec<_> = graph.sources().collect();
    let sink = graph.sinks().next().unwrap();
    for (pin, &source) in sources.iter().enumerate() {
        graph
            .connect(PinRef::output(source, 0), PinRef::input(gate, pin))
            .unwrap();
    }
    graph
        .connect(PinRef::output(gate, 0), PinRef::input(sink, 0))
        .unwrap();
    assert!(!session.verify().unwrap());
}

#[test]
fn nand_level_parses_with_restrictions() {
    let level = Level::from_json(NAND_LEVEL).unwrap();
    assert!(!level.allow_io_spawning);
    assert!(level.allow_gate_spawning);
    assert!(level.universal_gates_only);
}

#[rstest]
#[case(GateKind::Nand, true)]
#[case(GateKind::Nor, true)]
#[case(GateKind::And, false)]
#[case(GateKind::Not, false)]
fn universal_levels_restrict_the_palette(#[case] kind: GateKind, #[case] allowed: bool) {
    let mut session = Session::new(Level::from_json(NAND_LEVEL).unwrap(), Config::default()).unwrap();
    match session.spawn_gate(kind) {
        Ok(_) => assert!(allowed),
        Err(SimError::SpawnNotAllowed(what)) => {
            assert!(!allowed);
            assert_eq!(what, Spawnable::Gate(kind));
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn io_spawning_can_be_disabled() {
    let mut session = Session::new(Level::from_json(NAND_LEVEL).unwrap(), Config::default()).unwrap();
    assert!(matches!(
        session.spawn_input(),
        Err(SimError::SpawnNotAllowed(Spawnable::InputSource))
    ));
    assert!(matches!(
        session.spawn_output(),
        Err(SimError::SpawnNotAllowed(Spawnable::OutputSink))
    ));
}

#[test]
fn and_from_two_nands_solves_the_universal_level() {
    let mut session = Session::new(Level::from_json(NAND_LEVEL).unwrap(), Config::default()).unwrap();
    let first = session.spawn_gate(GateKind::Nand).unwrap();
    let second = session.spawn_gate(GateKind::Nand).unwrap();
    let graph = session.graph_mut();
    let sources: Vec<_> = graph.sources().collect();
    let sink = graph.sinks().next().unwrap();
    graph
        .connect(PinRef::output(sources[0], 0), PinRef::input(first, 0))
        .unwrap();
    graph
        .connect(PinRef::output(sources[1], 0), PinRef::input(first, 1))
        .unwrap();
    // A single wire into the second NAND turns it into an inverter.
    graph
        .connect(PinRef::output(first, 0), PinRef::input(second, 0))
        .unwrap();
    graph
        .connect(PinRef::output(second, 0), PinRef::input(sink, 0))
        .unwrap();

    for source in &sources {
        graph.toggle_input(*source).unwrap();
    }
    graph.tick();
    assert_eq!(graph.sink_states(), vec![true]);
    assert!(session.verify().unwrap());
}

#[test]
fn loops_cannot_be_verified() {
    let mut session = Session::new(and_level(), Config::default()).unwrap();
    let gate = session.spawn_gate(GateKind::Or).unwrap();
    session
        .graph_mut()
        .connect(PinRef::output(gate, 0), PinRef::input(gate, 0))
        .unwrap();
    assert!(matches!(
        session.verify(),
        Err(SimError::Analysis(AnalysisError::CyclicGraph { .. }))
    ));
}

#[test]
fn restart_discards_player_changes() {
    let mut session = Session::new(and_level(), Config::default()).unwrap();
    let gate = session.spawn_gate(GateKind::Xor).unwrap();
    session.restart().unwrap();
    assert!(session.graph().node(gate).is_none());
    assert_eq!(session.graph().gates().len(), 0);
    assert_eq!(session.graph().sources().len(), 2);
    assert_eq!(session.graph().wire_count(), 0);
}
