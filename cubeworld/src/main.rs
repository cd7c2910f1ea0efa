use anyhow::{anyhow, Result};
use cgmath::Point3;
use log::{debug, error, info};
use std::env;
use std::path::PathBuf;
use structopt::StructOpt;

use cubeworld::files::FileContext;
use cubeworld::{describe_stats, parse_point, Session};

#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long)]
    data_root: Option<PathBuf>,
    #[structopt(subcommand)]
    action: Action,
}

#[derive(Debug, StructOpt)]
enum Action {
    /// Generate the chunks around the origin and report what they contain.
    Generate {
        #[structopt(flatten)]
        options: LoadOpts,
    },
    /// Generate chunks and build their meshes.
    Mesh {
        #[structopt(flatten)]
        options: LoadOpts,
    },
    /// Find the first solid block along a line segment.
    Pick {
        #[structopt(flatten)]
        options: PickOpts,
    },
}

#[derive(Debug, StructOpt)]
struct LoadOpts {
    /// Overrides the load radius from the settings file.
    #[structopt(short, long)]
    radius: Option<i64>,
}

#[derive(Debug, StructOpt)]
struct PickOpts {
    #[structopt(long, parse(try_from_str = parse_point))]
    from: Point3<f64>,
    #[structopt(long, parse(try_from_str = parse_point))]
    to: Point3<f64>,
    /// Overrides the maximum number of steps from the settings file.
    #[structopt(short, long)]
    max_steps: Option<usize>,
}

fn run(opt: Opts) -> Result<()> {
    let data_root: PathBuf = match opt.data_root {
        None => {
            let exe_fp = env::current_exe()?;
            exe_fp
                .parent()
                .ok_or_else(|| anyhow!("Expected absolute directory for current exe"))?
                .into()
        }
        Some(data_root) => data_root,
    };

    let ctx = FileContext::new(data_root);
    ctx.ensure_directories()?;
    let settings = ctx.load_settings()?;
    let mut session = Session::new(&settings)?;

    match &opt.action {
        Action::Generate { options } => {
            let radius = options.radius.unwrap_or(settings.load_radius);
            session.load_around(Point3::new(0, 0, 0), radius);
            println!("{:?}", session.world.debug_summary());
        }
        Action::Mesh { options } => {
            let radius = options.radius.unwrap_or(settings.load_radius);
            session.load_around(Point3::new(0, 0, 0), radius);
            let (meshes, _textures) = session.build_meshes();
            for (chunk_pos, mesh) in meshes.iter() {
                debug!(
                    "Chunk {:?}: {} triangles, {} vertex bytes",
                    chunk_pos,
                    mesh.triangle_count(),
                    mesh.vertex_bytes().len()
                );
            }
            println!("{}", describe_stats(&meshes.stats()));
        }
        Action::Pick { options } => {
            let max_steps = options.max_steps.unwrap_or(settings.pick.max_steps);
            info!("Casting ray from {:?} to {:?}", options.from, options.to);
            match session.pick(options.from, options.to, max_steps) {
                Some(hit) => println!(
                    "Hit {} at {:?}, face normal {:?}, place at {:?}",
                    session.block_name(&hit),
                    hit.position,
                    hit.normal,
                    hit.adjacent
                ),
                None => println!("No block within {} steps", max_steps),
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    match run(Opts::from_args()) {
        Ok(()) => (),
        Err(end_error) => {
            for error in end_error.chain() {
                error!("{}", error);
                error!("========");
            }
        }
    }
}
