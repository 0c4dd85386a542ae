//! Scripted session: place points, then cycle Draw -> Flags -> Groups -> Draw.
//!
//! Run with `RUST_LOG=dotscan=debug` to see clustering summaries.

use dotscan::{Session, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() -> dotscan::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SessionConfig::default();
    let (width, height) = config.canvas();
    println!("canvas {}x{}, radius {}", width, height, config.radius());

    let mut session = Session::new(config);

    // Two knots, a straggler near the first one, and a lone click.
    let clicks = [
        // Knot A
        (100, 100),
        (130, 110),
        (110, 140),
        (140, 140),
        // Straggler, close to one knot point only
        (190, 100),
        // Knot B
        (500, 300),
        (520, 330),
        (545, 300),
        (530, 280),
        // Lone point
        (700, 550),
    ];
    for click in clicks {
        session.add_point(click);
    }

    for _ in 0..3 {
        let frame = session.advance()?;
        println!("\n=== {:?} ({} groups) ===", frame.mode, frame.fit.n_groups);
        for (i, (point, color)) in frame.dots.iter().enumerate() {
            println!(
                "  point {:2} {:>10} {:?} group {} => {}",
                i,
                point.to_string(),
                frame.fit.classification[i],
                frame.fit.groups[i],
                color
            );
        }
    }

    Ok(())
}
