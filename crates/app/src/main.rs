//! Entry point for Svarog3D.
//! Logging + CLI flags, then hands off to the platform loop.

use anyhow::{Result, bail};
use platform::RunConfig;

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_show_fps_arg(args: &[String]) -> bool {
    // --show-fps[=on|off], off by default
    for arg in args {
        if arg == "--show-fps" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--show-fps=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

/// `--<name>=<f32>`; a malformed value is an error rather than a silent default.
fn parse_f32_arg(args: &[String], name: &str, default: f32) -> Result<f32> {
    let prefix = format!("--{name}=");
    let mut value = default;
    for arg in args {
        if let Some(v) = arg.strip_prefix(&prefix) {
            value = match v.parse::<f32>() {
                Ok(parsed) if parsed.is_finite() => parsed,
                _ => bail!("Invalid value for --{name}: '{v}'"),
            };
        }
    }
    Ok(value)
}

fn parse_config(args: &[String]) -> Result<RunConfig> {
    let defaults = RunConfig::default();
    let (width, height) = parse_size_args(args);
    Ok(RunConfig {
        backends: parse_backend_arg(args),
        show_fps: parse_show_fps_arg(args),
        width,
        height,
        fov_deg: parse_f32_arg(args, "fov", defaults.fov_deg)?,
        camera_speed: parse_f32_arg(args, "camera-speed", defaults.camera_speed)?,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_config(&args)?;
    log::info!(
        "Starting Svarog3D. Backend: {:?}, show_fps={}, window_size={}x{}, fov={}deg, camera_speed={}",
        config.backends,
        config.show_fps,
        config.width,
        config.height,
        config.fov_deg,
        config.camera_speed
    );

    platform::run_with_renderer(config)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
