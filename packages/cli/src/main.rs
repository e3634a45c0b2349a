//! `hookshot` — command-line remote control for Hookshot host agents.
//!
//! Discovers agents broadcasting on the LAN and drives their control API:
//!
//! ```sh
//! # Watch for agents announcing themselves:
//! hookshot discover
//!
//! # Save one and start poking at it:
//! hookshot hosts add media-pc 192.168.1.20:8080
//! hookshot -H media-pc ping
//! hookshot -H media-pc screen -o now.png
//! hookshot -H media-pc volume set 32768
//! ```
//!
//! Every agent-facing subcommand targets `--host`, which accepts either a
//! literal `host:port` or the name of a saved host. Logging goes through
//! `tracing` with the usual `RUST_LOG` env-filter; the default is
//! `hookshot=info`.

mod format;
mod store;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use hookshot_api::{request, response};
use hookshot_client::{
    Client, DiscoveryListener, HostAddr, DEFAULT_APP_NAME, DEFAULT_DISCOVERY_PORT,
};
use store::HostStore;

/// hookshot — remote control for Hookshot host agents
#[derive(Parser)]
#[command(name = "hookshot", version, about, long_about = None)]
struct Cli {
    /// Target host: 'host:port' or a saved host name.
    #[arg(short = 'H', long, global = true, value_name = "HOST")]
    host: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(long, global = true, value_name = "SECS", default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Listen for agent broadcast announcements and print each host as it
    /// appears. Runs until interrupted.
    Discover {
        /// UDP port to listen on.
        #[arg(long, default_value_t = DEFAULT_DISCOVERY_PORT)]
        port: u16,

        /// Application name to accept announcements from (case-insensitive).
        #[arg(long, default_value = DEFAULT_APP_NAME)]
        app: String,
    },

    /// Manage the saved-host list.
    Hosts {
        #[command(subcommand)]
        action: HostsCommand,
    },

    /// Print the locally registered request catalog (method and path of
    /// every operation this client can issue).
    Endpoints,

    /// Fetch the agent's self-reported endpoint index.
    Api,

    /// Check that the agent is alive; it echoes the message back.
    Ping {
        /// Message to send.
        #[arg(default_value = "hello")]
        msg: String,
    },

    /// Capture the host's screen to a local file.
    Screen {
        /// Where to write the image.
        #[arg(short, long, default_value = "screen.png")]
        output: PathBuf,
    },

    /// Show where and how often the agent captures the screen.
    ScreenInfo,

    /// Host OS report: identity, memory, CPUs.
    Os,

    /// Field names available from `os`.
    OsSchema,

    /// The agent process's own vitals.
    Service,

    /// Field names available from `service`.
    ServiceSchema,

    /// Suspend the host.
    Sleep,

    /// Shut the host down.
    PowerOff,

    /// List the telemetry datasets the agent records.
    Datasets,

    /// Fetch one telemetry dataset.
    Dataset {
        /// Dataset name, e.g. `cpu`.
        name: String,

        /// Window start, epoch milliseconds.
        #[arg(long)]
        from: Option<i64>,

        /// Window end, epoch milliseconds.
        #[arg(long)]
        to: Option<i64>,
    },

    /// Process table snapshot.
    Ps,

    /// Kill a process by pid.
    Kill { pid: i64 },

    /// List mounted drives.
    Drives,

    /// List a directory on the host. Without PATH, continues from the
    /// last directory browsed on this saved host.
    Files { path: Option<String> },

    /// Launch a file on the host.
    Run {
        path: String,
        /// Arguments passed to the launched file.
        args: Vec<String>,
    },

    /// Beep the host speaker.
    Beep {
        /// Tone frequency in Hz (agent default when omitted).
        #[arg(long)]
        frequency: Option<i32>,

        /// Tone duration in milliseconds (agent default when omitted).
        #[arg(long)]
        duration: Option<i32>,
    },

    /// Speak text on the host.
    Speak {
        text: String,

        /// Speech rate (agent default when omitted).
        #[arg(long)]
        rate: Option<i32>,

        /// Speech volume (agent default when omitted).
        #[arg(long)]
        volume: Option<i32>,
    },

    /// Open or close the CD tray.
    Cdrom {
        #[arg(value_parser = ["open", "close"])]
        action: String,
    },

    /// Turn the host display on or off.
    Monitor {
        #[arg(value_parser = ["on", "off"])]
        action: String,
    },

    /// System and per-application volume control.
    Volume {
        #[command(subcommand)]
        action: VolumeCommand,
    },
}

#[derive(Subcommand)]
enum HostsCommand {
    /// Save a host under a short name.
    Add { name: String, address: String },
    /// List saved hosts.
    List,
    /// Forget a saved host.
    Remove { name: String },
}

#[derive(Subcommand)]
enum VolumeCommand {
    /// Set the system volume to an absolute level (0..=65535).
    Set {
        level: i32,

        #[arg(long, default_value = "master")]
        component: String,

        #[arg(long, default_value = "0")]
        device: String,
    },

    /// Change the system volume by a signed delta in device units.
    Change {
        delta: i32,

        #[arg(long, default_value = "master")]
        component: String,

        #[arg(long, default_value = "0")]
        device: String,
    },

    /// Mute or unmute the system volume.
    Mute {
        #[arg(value_parser = ["on", "off"])]
        action: String,

        #[arg(long, default_value = "master")]
        component: String,

        #[arg(long, default_value = "0")]
        device: String,
    },

    /// Set one application's volume to an absolute level.
    SetApp {
        /// Process name as the agent reports it, e.g. `player.exe`.
        process: String,

        level: f32,

        #[arg(long, default_value = "0")]
        device: String,
    },

    /// Change one application's volume by a signed delta.
    ChangeApp {
        process: String,

        delta: f32,

        #[arg(long, default_value = "0")]
        device: String,
    },

    /// Mute or unmute one application.
    MuteApp {
        process: String,

        #[arg(value_parser = ["on", "off"])]
        action: String,

        #[arg(long, default_value = "0")]
        device: String,
    },
}

/// A resolved call target: the address, plus the saved-host name when the
/// user referred to one (so browsing history can be recorded against it).
struct Target {
    addr: HostAddr,
    saved_name: Option<String>,
}

fn resolve_target(host: Option<&str>, store: &HostStore) -> Result<Target, Box<dyn Error>> {
    let Some(spec) = host else {
        return Err("no target host; pass --host 'host:port' or a saved host name".into());
    };

    if let Ok(addr) = spec.parse::<HostAddr>() {
        return Ok(Target {
            addr,
            saved_name: None,
        });
    }

    match store.get(spec) {
        Some(saved) => Ok(Target {
            addr: saved
                .address
                .parse()
                .map_err(|e| format!("saved host '{spec}' has a bad address: {e}"))?,
            saved_name: Some(spec.to_string()),
        }),
        None => Err(format!("unknown host '{spec}': not 'host:port' and not a saved name").into()),
    }
}

/// Report an error-envelope reply: `ok` on success, the agent's error
/// text as a failure otherwise.
fn check(ack: response::Ack) -> Result<(), Box<dyn Error>> {
    match ack.error {
        None => {
            println!("ok");
            Ok(())
        }
        Some(e) => Err(format!("agent error: {e}").into()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookshot=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Ctrl-C cancels whatever call is in flight rather than tearing the
    // process down mid-write.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    if let Err(e) = run(cli, cancel).await {
        eprintln!("hookshot: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<(), Box<dyn Error>> {
    let mut store = HostStore::load()?;
    let client = Client::with_timeout(Duration::from_secs(cli.timeout));
    let host = cli.host.as_deref();

    match cli.command {
        Command::Discover { port, app } => {
            let (listener, mut hosts) = DiscoveryListener::start(port, &app).await?;
            println!(
                "listening on udp {} for '{app}' announcements (ctrl-c to stop)",
                listener.local_addr()
            );
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    announcement = hosts.recv() => match announcement {
                        Some(a) => println!("{:<24} {}", a.hostname, a.addr()),
                        None => break,
                    },
                }
            }
            listener.stop().await;
        }

        Command::Hosts { action } => match action {
            HostsCommand::Add { name, address } => {
                address
                    .parse::<HostAddr>()
                    .map_err(|e| format!("invalid address: {e}"))?;
                store.upsert(&name, &address);
                store.save()?;
                println!("saved {name} = {address}");
            }
            HostsCommand::List => {
                for h in &store.hosts {
                    match &h.last_browsed {
                        Some(path) => println!("{:<16} {:<24} last browsed: {path}", h.name, h.address),
                        None => println!("{:<16} {}", h.name, h.address),
                    }
                }
            }
            HostsCommand::Remove { name } => {
                if !store.remove(&name) {
                    return Err(format!("no saved host named '{name}'").into());
                }
                store.save()?;
                println!("removed {name}");
            }
        },

        Command::Endpoints => {
            for e in request::catalog() {
                println!("{:<6} {}", e.method.to_string(), e.path);
            }
        }

        Command::Api => {
            let target = resolve_target(host, &store)?;
            let index = client.call(&target.addr, &request::Api, &cancel).await?;
            for e in &index.endpoints {
                println!("{:<6} {}", e.method, e.path);
            }
        }

        Command::Ping { msg } => {
            let target = resolve_target(host, &store)?;
            let reply = client
                .call(&target.addr, &request::Ping::new(msg), &cancel)
                .await?;
            println!("{}", reply.msg);
        }

        Command::Screen { output } => {
            let target = resolve_target(host, &store)?;
            let capture = client.call(&target.addr, &request::Screen, &cancel).await?;
            fs::write(&output, &capture.bytes)?;
            println!(
                "wrote {} ({})",
                output.display(),
                format::human_bytes(capture.bytes.len() as i64)
            );
        }

        Command::ScreenInfo => {
            let target = resolve_target(host, &store)?;
            let info = client
                .call(&target.addr, &request::ScreenInfo, &cancel)
                .await?;
            println!("image path: {}", info.image_path);
            println!("captured:   {}", info.when_captured);
            println!("period:     {}s", info.period);
        }

        Command::Os => {
            let target = resolve_target(host, &store)?;
            let os = client.call(&target.addr, &request::Os, &cancel).await?;
            println!("arch:    {}", os.arch);
            println!("release: {}", os.release);
            println!("uptime:  {}", os.uptime);
            println!(
                "memory:  {} used / {} total ({} free)",
                format::human_bytes(os.usedmem),
                format::human_bytes(os.totalmem),
                format::human_bytes(os.freemem)
            );
            println!("cpus:    {}", os.cpus.len());
            for cpu in &os.cpus {
                println!("  {} @ {} MHz", cpu.model, cpu.speed);
            }
        }

        Command::OsSchema => {
            let target = resolve_target(host, &store)?;
            let schema = client.call(&target.addr, &request::OsSchema, &cancel).await?;
            for field in &schema.fields {
                println!("{field}");
            }
        }

        Command::Service => {
            let target = resolve_target(host, &store)?;
            let service = client.call(&target.addr, &request::Service, &cancel).await?;
            println!("version: {}", service.version);
            println!(
                "memory:  rss {}, heap {} of {}",
                format::human_bytes(service.memory.resident_set_size),
                format::human_bytes(service.memory.heap_used),
                format::human_bytes(service.memory.heap_total)
            );
            for v in &service.versions {
                println!("  {} {}", v.name, v.version);
            }
        }

        Command::ServiceSchema => {
            let target = resolve_target(host, &store)?;
            let schema = client
                .call(&target.addr, &request::ServiceSchema, &cancel)
                .await?;
            for field in &schema.fields {
                println!("{field}");
            }
        }

        Command::Sleep => {
            let target = resolve_target(host, &store)?;
            check(client.call(&target.addr, &request::Sleep, &cancel).await?)?;
        }

        Command::PowerOff => {
            let target = resolve_target(host, &store)?;
            check(client.call(&target.addr, &request::PowerOff, &cancel).await?)?;
        }

        Command::Datasets => {
            let target = resolve_target(host, &store)?;
            let schemas = client
                .call(&target.addr, &request::DatasetsSchema, &cancel)
                .await?;
            for d in &schemas.datasets {
                println!(
                    "{:<16} period {}ms, keeps {} points",
                    d.name, d.period, d.limit
                );
            }
        }

        Command::Dataset { name, from, to } => {
            let target = resolve_target(host, &store)?;
            let series = client
                .call(&target.addr, &request::Dataset::new(&name, from, to), &cancel)
                .await?;
            for point in &series.points {
                println!("{}  {}", format::from_millis(point.timestamp), point.value);
            }
        }

        Command::Ps => {
            let target = resolve_target(host, &store)?;
            let table = client.call(&target.addr, &request::Processes, &cancel).await?;
            println!("last updated: {}", format::from_millis(table.last_updated));
            println!("{:>8}  {:<12} {:<28} {}", "PID", "MEM", "IMAGE", "WINDOW");
            for p in &table.processes {
                println!(
                    "{:>8}  {:<12} {:<28} {}",
                    p.pid,
                    format::human_bytes(p.mem_usage),
                    p.image_name,
                    p.window_title
                );
            }
        }

        Command::Kill { pid } => {
            let target = resolve_target(host, &store)?;
            let outcome = client
                .call(&target.addr, &request::KillProcess::new(pid), &cancel)
                .await?;
            if outcome.result {
                println!("ok");
            } else {
                return Err(format!(
                    "kill failed: {}",
                    outcome.error.unwrap_or_else(|| "unknown error".into())
                )
                .into());
            }
        }

        Command::Drives => {
            let target = resolve_target(host, &store)?;
            let drives = client.call(&target.addr, &request::Drives, &cancel).await?;
            for d in &drives.drives {
                if d.volume_name.is_empty() {
                    println!("{}", d.name);
                } else {
                    println!("{:<8} {}", d.name, d.volume_name);
                }
            }
        }

        Command::Files { path } => {
            let target = resolve_target(host, &store)?;
            let path = path
                .or_else(|| {
                    target
                        .saved_name
                        .as_deref()
                        .and_then(|n| store.get(n))
                        .and_then(|h| h.last_browsed.clone())
                })
                .ok_or("no path given and no browsing history for this host")?;

            let listing = client
                .call(&target.addr, &request::Files::new(&path), &cancel)
                .await?;
            for f in &listing.files {
                println!("{:<10} {}", f.kind, f.name);
            }

            if let Some(name) = &target.saved_name {
                store.set_last_browsed(name, &path);
                store.save()?;
            }
        }

        Command::Run { path, args } => {
            let target = resolve_target(host, &store)?;
            client
                .call(&target.addr, &request::RunFile::new(&path, args), &cancel)
                .await?;
            println!("started {path}");
        }

        Command::Beep {
            frequency,
            duration,
        } => {
            let target = resolve_target(host, &store)?;
            check(
                client
                    .call(&target.addr, &request::Beep::new(frequency, duration), &cancel)
                    .await?,
            )?;
        }

        Command::Speak { text, rate, volume } => {
            let target = resolve_target(host, &store)?;
            check(
                client
                    .call(
                        &target.addr,
                        &request::Speak::new(text, rate, volume),
                        &cancel,
                    )
                    .await?,
            )?;
        }

        Command::Cdrom { action } => {
            let target = resolve_target(host, &store)?;
            check(
                client
                    .call(
                        &target.addr,
                        &request::CdDrive::new(action == "open"),
                        &cancel,
                    )
                    .await?,
            )?;
        }

        Command::Monitor { action } => {
            let target = resolve_target(host, &store)?;
            check(
                client
                    .call(&target.addr, &request::Monitor::new(action == "on"), &cancel)
                    .await?,
            )?;
        }

        Command::Volume { action } => {
            let target = resolve_target(host, &store)?;
            let ack = match action {
                VolumeCommand::Set {
                    level,
                    component,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::SetSystemVolume::new(level, component, device),
                            &cancel,
                        )
                        .await?
                }
                VolumeCommand::Change {
                    delta,
                    component,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::ChangeSystemVolume::new(delta, component, device),
                            &cancel,
                        )
                        .await?
                }
                VolumeCommand::Mute {
                    action,
                    component,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::MuteSystemVolume::new(action == "on", component, device),
                            &cancel,
                        )
                        .await?
                }
                VolumeCommand::SetApp {
                    process,
                    level,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::SetAppVolume::new(process, level, device),
                            &cancel,
                        )
                        .await?
                }
                VolumeCommand::ChangeApp {
                    process,
                    delta,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::ChangeAppVolume::new(process, delta, device),
                            &cancel,
                        )
                        .await?
                }
                VolumeCommand::MuteApp {
                    process,
                    action,
                    device,
                } => {
                    client
                        .call(
                            &target.addr,
                            &request::MuteAppVolume::new(process, action == "on", device),
                            &cancel,
                        )
                        .await?
                }
            };
            check(ack)?;
        }
    }

    Ok(())
}
