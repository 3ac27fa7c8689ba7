use std::collections::HashSet;

use periodic_bc::export::write_keywords;
use periodic_bc::prelude::*;

use approx::assert_relative_eq;

fn all_faces() -> Vec<FacePairSpec> {
    vec![
        FacePairSpec::new("x1", "x0", SortAxes::YZ),
        FacePairSpec::new("y1", "y0", SortAxes::ZX),
        FacePairSpec::new("z1", "z0", SortAxes::XY),
    ]
}

#[test]
fn every_mode_keeps_one_equation_per_master_dof() {
    let modes = [
        LoadingMode::Tension,
        LoadingMode::bending(),
        LoadingMode::torsion(),
    ];
    for mode in modes {
        let mut host = MeshHost::unit_cell([3, 2, 4], [3.0, 2.0, 4.0]).unwrap();
        let plan = PeriodicSetup::default().plan(&host, &all_faces(), &mode).unwrap();

        let mut subjects = HashSet::new();
        for eq in plan.equations() {
            assert!(subjects.insert((eq.master, eq.dof)), "{} twice", eq.master);
        }
        for fp in &plan.face_pairs {
            assert_eq!(fp.node_sets.master_nodes.len(), fp.node_sets.slave_nodes.len());
            assert_eq!(fp.equations.len(), 3 * fp.pairs.len());
            for pair in &fp.pairs {
                let axes = fp.spec.sort_axes;
                assert!(pair.gap(axes.first()) <= 1e-6);
                assert!(pair.gap(axes.second()) <= 1e-6);
            }
        }

        let count = plan.equation_count();
        let report = plan.commit(&mut host).unwrap();
        assert_eq!(report.equation_count, count);
        assert_eq!(host.equations.len(), count);
        assert_eq!(host.reference_nodes.len(), mode.reference_slots().len());
    }
}

#[test]
fn bending_lever_measured_from_neutral_axis() {
    let mut host = MeshHost::unit_cell([2, 4, 1], [1.0, 2.0, 5.0]).unwrap();
    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    let mode = LoadingMode::bending().with_neutral_axis(1.0);

    let plan = PeriodicSetup::default().plan(&host, &faces, &mode).unwrap();
    let r2 = EquationNode::Reference(ReferenceSlot::R2);
    for (pair, chunk) in plan.face_pairs[0].pairs.iter().zip(plan.face_pairs[0].equations.chunks(3)) {
        let expected = 2.0 * (pair.master.coord(Axis::Y) - 1.0);
        assert_relative_eq!(chunk[2].coefficient(r2, Dof::U3).unwrap(), expected);
    }

    plan.commit(&mut host).unwrap();
}

#[test]
fn contact_nodes_never_enter_equations() {
    let mut host = MeshHost::unit_cell([2, 2, 2], [1.0, 1.0, 1.0]).unwrap();
    let centre = host.node_at([0.5, 0.5, 1.0], 1e-9).unwrap();
    let edge = host.node_at([1.0, 0.5, 1.0], 1e-9).unwrap();
    host.add_interaction("contact-top", [centre]).unwrap();
    host.add_interaction("tie-edge", [edge]).unwrap();
    let mut host = host.with_forbidden_interactions(&["contact-top"]);

    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    PeriodicSetup::default()
        .run(&mut host, &faces, &LoadingMode::Tension)
        .unwrap();

    let masters: HashSet<NodeId> = host.equations.iter().map(|eq| eq.terms[1].node).collect();
    assert!(!masters.contains(&centre));
    assert!(masters.contains(&edge));
    assert_eq!(masters.len(), 8);
}

#[test]
fn noisy_coordinates_pair_after_rounding() {
    let mut host = MeshHost::unit_cell([2, 2, 1], [1.0, 1.0, 1.0]).unwrap();
    for id in host.regions["z0"].clone() {
        let coords = host.nodes.get_mut(&id).unwrap();
        coords[0] += 2e-7;
        coords[1] -= 3e-7;
    }
    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];

    let strict = PeriodicSetup::new(PbcOptions::new().with_tolerance(1e-9));
    assert!(matches!(
        strict.plan(&host, &faces, &LoadingMode::Tension),
        Err(PbcError::ToleranceExceeded { .. })
    ));

    let rounded = PeriodicSetup::new(PbcOptions::new().with_tolerance(1e-9).with_rounding(4));
    let report = rounded.run(&mut host, &faces, &LoadingMode::Tension).unwrap();
    assert_eq!(report.total_pairs(), 9);
}

#[test]
fn keyword_deck_lists_every_equation() {
    let mut host = MeshHost::unit_cell([1, 1, 1], [1.0, 1.0, 1.0]).unwrap();
    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    PeriodicSetup::default()
        .run(&mut host, &faces, &LoadingMode::torsion())
        .unwrap();

    let deck = write_keywords(&host);
    assert_eq!(deck.matches("*EQUATION").count(), 12);
    assert!(deck.contains("*NSET, NSET=MFNode-z1, UNSORTED"));
    assert!(deck.contains("*NODE, NSET=PBC_REFERENCE"));
}

#[test]
fn host_round_trips_through_json() {
    let mut host = MeshHost::unit_cell([1, 1, 1], [1.0, 1.0, 1.0]).unwrap();
    host.add_interaction("contact", [NodeId(5)]).unwrap();

    let json = serde_json::to_string(&host).unwrap();
    let mut restored: MeshHost = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.nodes, host.nodes);

    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    let report = PeriodicSetup::default()
        .run(&mut restored, &faces, &LoadingMode::Tension)
        .unwrap();
    assert_eq!(report.total_pairs(), 3);
}

#[test]
fn sequential_modes_on_one_host_share_no_subject() {
    let mut host = MeshHost::unit_cell([2, 2, 2], [1.0, 1.0, 1.0]).unwrap();
    let runs = [
        ("T", FacePairSpec::new("x1", "x0", SortAxes::YZ), LoadingMode::Tension),
        ("B", FacePairSpec::new("y1", "y0", SortAxes::ZX), LoadingMode::bending()),
        ("R", FacePairSpec::new("z1", "z0", SortAxes::XY), LoadingMode::torsion()),
    ];

    let mut retained = Vec::new();
    for (prefix, faces, mode) in runs {
        let setup = PeriodicSetup::new(PbcOptions::new().with_prefix(prefix));
        let report = setup.run(&mut host, &[faces], &mode).unwrap();
        retained.push(report.total_pairs());
    }
    // same exclusions as a single run over all three face pairs
    assert_eq!(retained, vec![9, 6, 4]);

    // every mode again on the z faces adds nothing
    for (prefix, mode) in [("T2", LoadingMode::Tension), ("B2", LoadingMode::bending())] {
        let setup = PeriodicSetup::new(PbcOptions::new().with_prefix(prefix));
        let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY).with_set_names(prefix, "S")];
        let report = setup.run(&mut host, &faces, &mode).unwrap();
        assert_eq!(report.equation_count, 0);
    }

    let mut subjects = HashSet::new();
    for eq in &host.equations {
        assert!(subjects.insert((eq.terms[1].node, eq.terms[1].dof)), "{} repeats a subject", eq.name);
    }
    assert_eq!(subjects.len(), 19 * 3);
}

#[test]
fn solved_neutral_axis_uses_third_reference_node() {
    let mut host = MeshHost::unit_cell([2, 2, 1], [1.0, 1.0, 2.0]).unwrap();
    let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    let mode = LoadingMode::bending().solving_neutral_axis();

    let report = PeriodicSetup::default().run(&mut host, &faces, &mode).unwrap();
    assert_eq!(host.reference_nodes.len(), 3);
    let r2 = report.reference_node(ReferenceSlot::R2).unwrap();
    let r3 = report.reference_node(ReferenceSlot::R3).unwrap();

    for eq in host.equations.iter().filter(|eq| eq.name.ends_with("-u3")) {
        let master = host.nodes[&eq.terms[1].node];
        assert_eq!(eq.terms.len(), 5);
        assert_eq!(eq.terms[3].node, r2);
        assert_relative_eq!(eq.terms[3].coefficient, 2.0 * master[1]);
        assert_eq!((eq.terms[4].node, eq.terms[4].dof), (r3, Dof::U3));
        assert_relative_eq!(eq.terms[4].coefficient, -1.0);
    }
    assert!(write_keywords(&host).contains("*EQUATION\n5\n"));
}
