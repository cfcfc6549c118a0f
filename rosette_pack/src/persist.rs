// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-oriented `x,y,radius` circle files.

use std::io::{BufRead, Write};

use kurbo::{Circle, Point};

use crate::error::{PackError, Result};

/// Write one `x,y,radius` line per circle.
///
/// Numbers use the shortest representation that parses back to the same `f64`.
pub fn write_circles<W: Write>(mut out: W, circles: &[Circle]) -> Result<()> {
    for c in circles {
        writeln!(out, "{},{},{}", c.center.x, c.center.y, c.radius)?;
    }
    out.flush()?;
    Ok(())
}

/// Parse a circle file.
///
/// Every line must hold exactly three comma-separated numbers; surrounding whitespace
/// on each field is ignored. The whole input is parsed before anything is returned.
pub fn read_circles<R: BufRead>(input: R) -> Result<Vec<Circle>> {
    let mut circles = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        match parse_record(&line) {
            Some(c) => circles.push(c),
            None => {
                return Err(PackError::MalformedRecord {
                    line: i + 1,
                    content: line,
                });
            }
        }
    }
    Ok(circles)
}

fn parse_record(line: &str) -> Option<Circle> {
    let mut fields = line.split(',').map(|f| f.trim().parse::<f64>());
    let x = fields.next()?.ok()?;
    let y = fields.next()?.ok()?;
    let r = fields.next()?.ok()?;
    if fields.next().is_some() || r < 0.0 {
        return None;
    }
    Some(Circle::new(Point::new(x, y), r))
}
