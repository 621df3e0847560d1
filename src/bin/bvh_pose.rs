//! Pose inspection utility
//!
//! Loads a skeleton (JSON produced by a BVH parser), evaluates one tick and
//! prints every joint's world position.
//!
//! Usage:
//!     bvh_pose [OPTIONS] <SKELETON_JSON>
//!
//! Options:
//!     -t, --time <SECONDS>    Host time to evaluate (default: 0.0)
//!     -s, --speed <X>         Playback speed multiplier, 0.01-2.0 (default: 1.0)
//!     --no-interpolate        Snap to the current keyframe
//!     --rest                  Print the rest pose instead of an animated tick
//!     -c, --config <JSON>     Playback config file (flags override it)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use bvh_player::animation::{Joint, SkeletonPlayer};
use bvh_player::core::{logging, Mat4, Vec3};
use bvh_player::{PlaybackConfig, SkeletonData};

fn print_help() {
    eprintln!("bvh_pose - Evaluate one tick of a skeleton clip");
    eprintln!();
    eprintln!("Usage: bvh_pose [OPTIONS] <SKELETON_JSON>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -t, --time <SECONDS>    Host time to evaluate (default: 0.0)");
    eprintln!("    -s, --speed <X>         Playback speed multiplier, 0.01-2.0 (default: 1.0)");
    eprintln!("    --no-interpolate        Snap to the current keyframe");
    eprintln!("    --rest                  Print the rest pose instead of an animated tick");
    eprintln!("    -c, --config <JSON>     Playback config file (flags override it)");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    bvh_pose --time 1.25 ./clips/walk.json");
    eprintln!("    bvh_pose --rest ./clips/walk.json");
}

#[derive(Debug)]
struct Args {
    skeleton: PathBuf,
    time: f32,
    speed: Option<f32>,
    no_interpolate: bool,
    rest: bool,
    config: Option<PathBuf>,
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let value = args
        .get(i)
        .ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        return Err("Missing skeleton file".to_string());
    }

    let mut time = 0.0f32;
    let mut speed = None;
    let mut no_interpolate = false;
    let mut rest = false;
    let mut config = None;
    let mut skeleton: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-t" | "--time" => {
                i += 1;
                time = parse_value(&args, i, "--time")?;
                if !(time >= 0.0) {
                    return Err("--time must be non-negative".to_string());
                }
            }
            "-s" | "--speed" => {
                i += 1;
                speed = Some(parse_value(&args, i, "--speed")?);
            }
            "--no-interpolate" => no_interpolate = true,
            "--rest" => rest = true,
            "-c" | "--config" => {
                i += 1;
                config = Some(parse_value(&args, i, "--config")?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if skeleton.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                skeleton = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    let skeleton = skeleton.ok_or_else(|| "Missing skeleton file".to_string())?;

    Ok(Args {
        skeleton,
        time,
        speed,
        no_interpolate,
        rest,
        config,
    })
}

fn print_pose(names: &[&str], depths: &[usize], positions: &[Vec3]) {
    for ((name, depth), p) in names.iter().zip(depths).zip(positions) {
        let label = format!("{}{}", "  ".repeat(*depth), name);
        println!("{:<32} {:>10.4} {:>10.4} {:>10.4}", label, p.x, p.y, p.z);
    }
}

fn run(args: Args) -> bvh_player::Result<()> {
    let data = Arc::new(SkeletonData::load(&args.skeleton)?);
    let index = data.joint_index();
    let names = index.names();
    let depths: Vec<usize> = index.iter().map(|entry| entry.depth).collect();

    if args.rest {
        print_pose(&names, &depths, &data.rest_positions());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };
    if let Some(speed) = args.speed {
        config.set_speed(speed);
    }
    if args.no_interpolate {
        config.interpolate = false;
    }
    config.animate = true;

    let mut player = SkeletonPlayer::with_config(Arc::clone(&data), config)?;
    let mut positions = Vec::with_capacity(names.len());
    let state = player.update(args.time, &mut |_: &Joint, world: &Mat4| {
        positions.push(world.w_axis.truncate())
    });

    if let Some(state) = state {
        log::info!(
            "Clip time {:.4}s: frame {} of {}, t = {:.3}",
            state.time,
            state.frame_index,
            data.num_frames,
            state.t
        );
    }
    print_pose(&names, &depths, &positions);
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
