use std::fmt::Write as _;

use vbake::{decode, Framing, VertexRecord, RECORD_SIZE};

use crate::{cli::InspectArgs, Error};

pub fn inspect(args: &InspectArgs) -> Result<(), Error> {
    let bytes = std::fs::read(&args.file).map_err(|source| Error::Read {
        path: args.file.clone(),
        source,
    })?;
    let framing = if args.header {
        Framing::Headered
    } else {
        Framing::detect(&bytes)
    };
    let records = decode(&bytes, framing)?;
    tracing::debug!(bytes = bytes.len(), ?framing, "decoded");
    print!("{}", report(&records, framing, args.records));
    Ok(())
}

fn report(records: &[VertexRecord], framing: Framing, show: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} records ({} triangles, {} bytes each), {:?} framing",
        records.len(),
        records.len() / 3,
        RECORD_SIZE,
        framing
    );
    if records.len() % 3 != 0 {
        let _ = writeln!(out, "warning: record count is not a multiple of 3");
    }
    if let Some(first) = records.first() {
        let (min, max) = records.iter().fold(
            (first.position, first.position),
            |(min, max), r| (min.inf(&r.position), max.sup(&r.position)),
        );
        let _ = writeln!(
            out,
            "bounds: ({}, {}, {}) .. ({}, {}, {})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
    for (i, r) in records.iter().take(show).enumerate() {
        let _ = writeln!(
            out,
            "{i:>6}: pos ({}, {}, {}) normal ({}, {}, {}) uv ({}, {}) color {:?}",
            r.position.x,
            r.position.y,
            r.position.z,
            r.normal.x,
            r.normal.y,
            r.normal.z,
            r.uv.x,
            r.uv.y,
            r.color,
        );
    }
    out
}
