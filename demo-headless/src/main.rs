use clap::Parser;
use smoke_sim_core::{paint_border, paint_circle, SimConfig, SmokeSim, Vec2};

/// Headless smoke simulation demo with configurable parameters
///
/// Acts as the host loop: paints the obstacle and impulse masks, steps the
/// simulator, and reports field statistics at a fixed interval.
#[derive(Parser, Debug)]
#[command(name = "smoke-sim-demo")]
#[command(about = "2D Eulerian smoke simulation demo", long_about = None)]
struct Args {
    /// Grid width in cells (multiple of 32)
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Grid height in cells (multiple of 32)
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 400)]
    ticks: u64,

    /// Time step per tick
    #[arg(long, default_value_t = 0.125)]
    time_step: f32,

    /// Jacobi iterations per pressure solve
    #[arg(short, long, default_value_t = 50)]
    jacobi_iterations: u32,

    /// Temperature injected under the emitter
    #[arg(long, default_value_t = 10.0)]
    impulse_temperature: f32,

    /// Density injected under the emitter
    #[arg(long, default_value_t = 1.0)]
    impulse_density: f32,

    /// Emitter radius in normalized grid space
    #[arg(long, default_value_t = 0.05)]
    emitter_radius: f32,

    /// Horizontal drift of the emitter (normalized units per tick)
    #[arg(long, default_value_t = 0.0)]
    emitter_drift: f32,

    /// Solid border thickness in cells (0 = open domain)
    #[arg(long, default_value_t = 2)]
    border: usize,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 50)]
    report_interval: u64,

    /// Print an ASCII density frame with each report
    #[arg(short, long)]
    ascii: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Smoke Simulation Demo ===\n");

    let config = SimConfig {
        width: args.width,
        height: args.height,
        time_step: args.time_step,
        jacobi_iterations: args.jacobi_iterations,
        impulse_temperature: args.impulse_temperature,
        impulse_density: args.impulse_density,
        ..SimConfig::default()
    };
    let mut sim = SmokeSim::new(config)?;
    println!(
        "Created {}x{} simulation, dt={}, {} Jacobi iterations",
        args.width, args.height, args.time_step, args.jacobi_iterations
    );

    // Mask Provider role: a solid border plus a circular emitter near the
    // bottom; the emitter can drift sideways, repainted every tick
    if args.border > 0 {
        paint_border(sim.obstacles_mut()?, args.border);
        println!("Painted a {}-cell solid border", args.border);
    }
    let mut emitter = Vec2::new(0.5, 0.15);
    println!(
        "Emitter at ({:.2}, {:.2}), radius {:.3}, drift {:+.4}/tick\n",
        emitter.x, emitter.y, args.emitter_radius, args.emitter_drift
    );

    println!(
        "{:>8} {:>14} {:>12} {:>12} {:>12}",
        "tick", "total density", "peak temp", "peak speed", "max |div|"
    );

    for tick in 1..=args.ticks {
        paint_circle(sim.impulse_mut()?, emitter, args.emitter_radius);
        sim.step()?;

        if args.emitter_drift != 0.0 {
            emitter.x = (emitter.x + args.emitter_drift).rem_euclid(1.0);
        }

        if tick % args.report_interval == 0 || tick == args.ticks {
            let peak_temp = sim
                .temperature()?
                .as_slice()
                .iter()
                .fold(0.0_f32, |a, &b| a.max(b));
            let max_div = sim
                .divergence()?
                .as_slice()
                .iter()
                .fold(0.0_f32, |a, &b| a.max(b.abs()));
            println!(
                "{:>8} {:>14.3} {:>12.3} {:>12.4} {:>12.5}",
                tick,
                sim.density()?.total(),
                peak_temp,
                sim.velocity()?.max_norm(),
                max_div
            );
            if args.ascii {
                print_ascii_frame(&sim)?;
            }
        }
    }

    println!("\n=== Final State ===");
    println!("Ticks completed: {}", sim.ticks());
    println!("Total density:   {:.3}", sim.density()?.total());
    println!("Peak speed:      {:.4}", sim.velocity()?.max_norm());
    Ok(())
}

/// Presenter role: downsample the density field into a character ramp
fn print_ascii_frame(sim: &SmokeSim) -> Result<(), Box<dyn std::error::Error>> {
    const RAMP: &[u8] = b" .:-=+*#%@";
    const COLS: usize = 64;
    const ROWS: usize = 24;

    let density = sim.density()?;
    let cols = COLS.min(density.width);
    let rows = ROWS.min(density.height);

    // Top row of the printout is the top of the domain; block boundaries
    // carry the division remainder so every cell lands in exactly one glyph
    for row in (0..rows).rev() {
        let (y0, y1) = block_range(row, rows, density.height);
        let mut line = String::with_capacity(cols);
        for col in 0..cols {
            let (x0, x1) = block_range(col, cols, density.width);
            let mut sum = 0.0;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += density.get(x, y);
                }
            }
            let mean = sum / ((x1 - x0) * (y1 - y0)) as f32;
            let level = ((mean * (RAMP.len() - 1) as f32) as usize).min(RAMP.len() - 1);
            line.push(RAMP[level] as char);
        }
        println!("{line}");
    }
    println!();
    Ok(())
}

/// Half-open cell range of downsample block `index` out of `count` over an
/// `extent`-cell axis
fn block_range(index: usize, count: usize, extent: usize) -> (usize, usize) {
    (index * extent / count, (index + 1) * extent / count)
}
