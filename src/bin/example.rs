//! Periodic BC example - unit cell under tension, bending and torsion

use anyhow::{Context, Result};
use periodic_bc::export::write_keywords;
use periodic_bc::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Periodic BC Example: 4 x 4 x 2 Unit Cell ===\n");

    // Cell dimensions (mm)
    let size = [2.0, 2.0, 1.0];
    let divisions = [4, 4, 2];

    // Tension through all three face pairs. Later face pairs skip nodes
    // already used as masters on shared edges.
    let mut host = MeshHost::unit_cell(divisions, size)?;
    let faces = [
        FacePairSpec::new("x1", "x0", SortAxes::YZ).with_set_names("MFn-X", "SFn-X"),
        FacePairSpec::new("y1", "y0", SortAxes::ZX).with_set_names("MFn-Y", "SFn-Y"),
        FacePairSpec::new("z1", "z0", SortAxes::XY).with_set_names("MFn-Z", "SFn-Z"),
    ];

    let setup = PeriodicSetup::new(PbcOptions::default().with_rounding(6));
    let report = setup
        .run(&mut host, &faces, &LoadingMode::Tension)
        .context("tension setup failed")?;
    print_report(&report);

    let load = ReferenceLoad::for_mode(&LoadingMode::Tension, SortAxes::XY, 1e-3, size[2])?;
    println!("  Prescribe {}.{} = {:.6}\n", load.slot, load.dof, load.value);

    // Bending and torsion of a beam segment: only the z faces are periodic.
    // The corner under a (pretend) contact interaction stays unconstrained.
    let beam_faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
    for (mode, magnitude) in [
        (LoadingMode::bending().with_neutral_axis(size[1] / 2.0), 0.01),
        (LoadingMode::torsion().with_center(size[0] / 2.0, size[1] / 2.0), 0.02),
    ] {
        let mut host = MeshHost::unit_cell(divisions, size)?;
        let corner = host
            .node_at([0.0, 0.0, size[2]], 1e-9)
            .context("corner node missing")?;
        host.add_interaction("contact-corner", [corner])?;

        let report = PeriodicSetup::default()
            .run(&mut host, &beam_faces, &mode)
            .with_context(|| format!("{} setup failed", mode))?;
        print_report(&report);

        let load = ReferenceLoad::for_mode(&mode, SortAxes::XY, magnitude, size[2])?;
        println!("  Prescribe {}.{} = {:.6}\n", load.slot, load.dof, load.value);

        if let LoadingMode::Torsion { .. } = mode {
            println!("Keyword deck (first 24 lines):");
            for line in write_keywords(&host).lines().take(24) {
                println!("  {}", line);
            }
        }
    }

    println!("\n=== Setup Complete ===");
    Ok(())
}

fn print_report(report: &SetupReport) {
    println!("=== {} ===", report.mode);
    for (slot, id) in &report.reference_nodes {
        println!("  Reference node {} -> {}", slot, id);
    }
    for fp in &report.face_pairs {
        println!(
            "  {} <=> {}: {} of {} pairs kept, {} equations ({} / {})",
            fp.master_face,
            fp.slave_face,
            fp.retained,
            fp.located,
            fp.equations,
            fp.master_set,
            fp.slave_set
        );
    }
    println!("  Total equations: {}", report.equation_count);
}
