//! Minimal Wavefront OBJ writer for region meshes.

use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

use relief_mesh_cpu::RegionMesh;

/// Writes one region as an OBJ object. Vertices are shifted back to
/// world space by the region origin so the files line up when loaded
/// together.
pub fn write_region(path: &Path, mesh: &RegionMesh) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "o region_{}_{}", mesh.col, mesh.row)?;
    for v in &mesh.mesh.pos {
        let p = *v + mesh.origin;
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for t in &mesh.mesh.uv {
        writeln!(w, "vt {} {}", t.x, t.y)?;
    }
    for tri in mesh.mesh.idx.chunks_exact(3) {
        writeln!(
            w,
            "f {a}/{a} {b}/{b} {c}/{c}",
            a = tri[0] + 1,
            b = tri[1] + 1,
            c = tri[2] + 1
        )?;
    }
    w.flush()
}
