use std::io::{self, Write};

use crate::dynamics::state::State;

/// Write trajectory data to CSV format.
///
/// Columns: step, time, x, y, vx, vy, r
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[State]) -> io::Result<()> {
    writeln!(writer, "step,time,x,y,vx,vy,r")?;

    for (i, s) in trajectory.iter().enumerate() {
        writeln!(
            writer,
            "{},{:.4},{:.3},{:.3},{:.6},{:.6},{:.3}",
            i,
            s.time,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.radius(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[State]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}

/// Write a (parameter, deflection) series, e.g. from a sweep.
pub fn write_series<W: Write>(writer: &mut W, x_label: &str, series: &[(f64, f64)]) -> io::Result<()> {
    writeln!(writer, "{},deflection_deg", x_label)?;
    for (x, delta) in series {
        writeln!(writer, "{:.6},{:.6}", x, delta)?;
    }
    Ok(())
}

pub fn write_series_file(path: &str, x_label: &str, series: &[(f64, f64)]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_series(&mut file, x_label, series)
}
