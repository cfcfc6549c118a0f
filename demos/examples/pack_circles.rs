// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle packing.
//!
//! Pack a wrapping canvas, save the result, and load it back. Set `RUST_LOG=debug`
//! (or `trace`) to watch the packer.
//!
//! Run:
//! - `cargo run -p rosette_demos --example pack_circles`
//! - `cargo run -p rosette_demos --example pack_circles -- decaying`

use kurbo::{Point, Rect};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rosette_pack::{CirclePacker, PackParams, RadiusPolicy};

fn main() -> rosette_pack::Result<()> {
    env_logger::init();

    let policy = match std::env::args().nth(1).as_deref() {
        Some("decaying") => RadiusPolicy::decaying(),
        _ => RadiusPolicy::Maximal,
    };
    let bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
    let hole = Point::new(320.0, 240.0);
    let params = PackParams::builder(bounds)
        .radius(2.0, 48.0)
        .padding(1.5)
        .wrap(true)
        .target_fill_ratio(0.6)
        .max_attempts(2_000_000)
        .radius_policy(policy)
        .mask(move |p| p.distance(hole) > 80.0)
        .build()?;

    let mut packer = CirclePacker::new(params);
    let summary = packer.pack(&mut StdRng::seed_from_u64(2025));
    println!(
        "placed {} circles ({} stored with wrap images) in {} attempts, fill {:.3}, stopped by {:?}",
        summary.placed,
        packer.circles().len(),
        summary.attempts,
        summary.fill_ratio,
        summary.stop
    );

    let path = std::env::temp_dir().join("rosette_pack_circles.txt");
    packer.save(&path)?;
    info!("saved to {}", path.display());

    let mut reloaded = CirclePacker::new(
        PackParams::builder(bounds)
            .radius(2.0, 48.0)
            .padding(1.5)
            .wrap(true)
            .target_fill_ratio(0.6)
            .build()?,
    );
    reloaded.load(&path)?;
    assert_eq!(reloaded.circles(), packer.circles(), "reload reproduces the packing");
    println!("reloaded {} circles from {}", reloaded.circles().len(), path.display());
    Ok(())
}
