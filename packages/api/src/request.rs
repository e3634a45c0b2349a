//! Typed requests for every host-agent operation.
//!
//! Each operation is a plain struct holding its parameters and describing
//! itself as an [`Endpoint`] — no I/O happens here. The associated
//! [`Request::Reply`] type ties every request to the response shape the
//! agent answers with, so the client's `call` can decode without being
//! told what to expect.
//!
//! The full catalog is enumerated in [`catalog`]; a new operation is not
//! wired up until it is added both here and there.

use crate::decode::Decode;
use crate::endpoint::Endpoint;
use crate::response;

/// A typed request: owns its parameters, names its reply shape, and
/// describes its endpoint. Exactly one pure function, no side effects.
pub trait Request {
    type Reply: Decode;

    fn endpoint(&self) -> Endpoint;
}

/// `GET api?format=json` — the agent's endpoint index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Api;

impl Request for Api {
    type Reply = response::Api;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("api").arg("format", "json")
    }
}

/// `GET ping?msg=…` — liveness probe; the agent echoes `msg` back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ping {
    pub msg: String,
}

impl Ping {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl Request for Ping {
    type Reply = response::Ping;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("ping").arg("msg", &self.msg)
    }
}

/// `GET screen/now` — the current screen capture, raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen;

impl Request for Screen {
    type Reply = response::Screen;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("screen/now")
    }
}

/// `GET screen/info` — capture location and refresh period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenInfo;

impl Request for ScreenInfo {
    type Reply = response::ScreenInfo;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("screen/info")
    }
}

/// `GET os/schema` — field names available from [`Os`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsSchema;

impl Request for OsSchema {
    type Reply = response::Schema;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("os/schema")
    }
}

/// `GET os/query` — host OS report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Os;

impl Request for Os {
    type Reply = response::Os;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("os/query")
    }
}

/// `GET service/schema` — field names available from [`Service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceSchema;

impl Request for ServiceSchema {
    type Reply = response::Schema;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("service/schema")
    }
}

/// `GET service/query` — the agent's own vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Service;

impl Request for Service {
    type Reply = response::Service;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("service/query")
    }
}

/// `POST os/sleep` — suspend the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sleep;

impl Request for Sleep {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/sleep")
    }
}

/// `POST os/power-off` — shut the host down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerOff;

impl Request for PowerOff {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/power-off")
    }
}

/// `GET datasets/schema` — which telemetry datasets the agent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetsSchema;

impl Request for DatasetsSchema {
    type Reply = response::DatasetsSchema;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("datasets/schema")
    }
}

/// `GET datasets/dataset/{name}?from=…&to=…` — one telemetry series.
///
/// `from`/`to` bound the window in epoch milliseconds; either side may be
/// open, in which case the parameter is omitted from the URL entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub name: String,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, from: Option<i64>, to: Option<i64>) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }
}

impl Request for Dataset {
    type Reply = response::Dataset;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get(format!("datasets/dataset/{}", self.name))
            .opt_arg("from", self.from.map(|v| v.to_string()))
            .opt_arg("to", self.to.map(|v| v.to_string()))
    }
}

/// `GET processes` — process table snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Processes;

impl Request for Processes {
    type Reply = response::Processes;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("processes")
    }
}

/// `DELETE processes/{pid}` — terminate one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KillProcess {
    pub pid: i64,
}

impl KillProcess {
    pub fn new(pid: i64) -> Self {
        Self { pid }
    }
}

impl Request for KillProcess {
    type Reply = response::KillProcess;

    fn endpoint(&self) -> Endpoint {
        Endpoint::delete(format!("processes/{}", self.pid))
    }
}

/// `GET filesystem/drives` — mounted drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drives;

impl Request for Drives {
    type Reply = response::Drives;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("filesystem/drives")
    }
}

/// `GET filesystem/files?path=…` — directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Files {
    pub path: String,
}

impl Files {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Request for Files {
    type Reply = response::Files;

    fn endpoint(&self) -> Endpoint {
        Endpoint::get("filesystem/files").arg("path", &self.path)
    }
}

/// `POST filesystem/files/run?path=…&args=…&args=…` — launch a file on
/// the host. Each argument is its own repeated `args` pair, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunFile {
    pub path: String,
    pub args: Vec<String>,
}

impl RunFile {
    pub fn new(path: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }
}

impl Request for RunFile {
    type Reply = response::Empty;

    fn endpoint(&self) -> Endpoint {
        let mut endpoint = Endpoint::post("filesystem/files/run").arg("path", &self.path);
        for arg in &self.args {
            endpoint = endpoint.arg("args", arg);
        }
        endpoint
    }
}

/// `POST os/beep?frequency=…&duration=…` — beep the host speaker.
/// Omitted parameters fall back to the agent's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Beep {
    pub frequency: Option<i32>,
    pub duration: Option<i32>,
}

impl Beep {
    pub fn new(frequency: Option<i32>, duration: Option<i32>) -> Self {
        Self {
            frequency,
            duration,
        }
    }
}

impl Request for Beep {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/beep")
            .opt_arg("frequency", self.frequency.map(|v| v.to_string()))
            .opt_arg("duration", self.duration.map(|v| v.to_string()))
    }
}

/// `POST os/speak?text=…&rate=…&volume=…` — text-to-speech on the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Speak {
    pub text: String,
    pub rate: Option<i32>,
    pub volume: Option<i32>,
}

impl Speak {
    pub fn new(text: impl Into<String>, rate: Option<i32>, volume: Option<i32>) -> Self {
        Self {
            text: text.into(),
            rate,
            volume,
        }
    }
}

impl Request for Speak {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/speak")
            .arg("text", &self.text)
            .opt_arg("rate", self.rate.map(|v| v.to_string()))
            .opt_arg("volume", self.volume.map(|v| v.to_string()))
    }
}

/// `POST os/cdrom?action=open|close` — eject or retract the CD tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CdDrive {
    pub open: bool,
}

impl CdDrive {
    pub fn new(open: bool) -> Self {
        Self { open }
    }
}

impl Request for CdDrive {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/cdrom").arg("action", if self.open { "open" } else { "close" })
    }
}

/// `POST os/monitor?action=on|off` — wake or blank the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Monitor {
    pub on: bool,
}

impl Monitor {
    pub fn new(on: bool) -> Self {
        Self { on }
    }
}

impl Request for Monitor {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/monitor").arg("action", if self.on { "on" } else { "off" })
    }
}

/// `POST os/changesysvolume` — nudge the system volume by a signed delta.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSystemVolume {
    pub volume_change: i32,
    pub component: String,
    pub device_index: String,
}

impl ChangeSystemVolume {
    pub fn new(
        volume_change: i32,
        component: impl Into<String>,
        device_index: impl Into<String>,
    ) -> Self {
        Self {
            volume_change,
            component: component.into(),
            device_index: device_index.into(),
        }
    }
}

impl Request for ChangeSystemVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/changesysvolume")
            .arg("volumeChange", self.volume_change.to_string())
            .arg("component", &self.component)
            .arg("deviceIndex", &self.device_index)
    }
}

/// `POST os/mutesysvolume?action=0|1` — mute (`1`) or unmute (`0`) the
/// system volume.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MuteSystemVolume {
    pub mute: bool,
    pub component: String,
    pub device_index: String,
}

impl MuteSystemVolume {
    pub fn new(mute: bool, component: impl Into<String>, device_index: impl Into<String>) -> Self {
        Self {
            mute,
            component: component.into(),
            device_index: device_index.into(),
        }
    }
}

impl Request for MuteSystemVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/mutesysvolume")
            .arg("action", if self.mute { "1" } else { "0" })
            .arg("component", &self.component)
            .arg("deviceIndex", &self.device_index)
    }
}

/// `POST os/changeappvolume` — nudge one application's volume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeAppVolume {
    pub process: String,
    pub volume_level: f32,
    pub device_index: String,
}

impl ChangeAppVolume {
    pub fn new(
        process: impl Into<String>,
        volume_level: f32,
        device_index: impl Into<String>,
    ) -> Self {
        Self {
            process: process.into(),
            volume_level,
            device_index: device_index.into(),
        }
    }
}

impl Request for ChangeAppVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/changeappvolume")
            .arg("process", &self.process)
            .arg("volumeLevel", self.volume_level.to_string())
            .arg("deviceIndex", &self.device_index)
    }
}

/// `POST os/muteappvolume?action=0|1` — mute or unmute one application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MuteAppVolume {
    pub process: String,
    pub mute: bool,
    pub device_index: String,
}

impl MuteAppVolume {
    pub fn new(process: impl Into<String>, mute: bool, device_index: impl Into<String>) -> Self {
        Self {
            process: process.into(),
            mute,
            device_index: device_index.into(),
        }
    }
}

impl Request for MuteAppVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/muteappvolume")
            .arg("process", &self.process)
            .arg("action", if self.mute { "1" } else { "0" })
            .arg("deviceIndex", &self.device_index)
    }
}

/// `POST os/setsysvolume` — set the system volume to an absolute level in
/// `0..=65535` device units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetSystemVolume {
    pub volume_level: i32,
    pub component: String,
    pub device_index: String,
}

impl SetSystemVolume {
    pub const VOLUME_MIN: i32 = 0;
    pub const VOLUME_MAX: i32 = 65535;

    pub fn new(
        volume_level: i32,
        component: impl Into<String>,
        device_index: impl Into<String>,
    ) -> Self {
        Self {
            volume_level,
            component: component.into(),
            device_index: device_index.into(),
        }
    }
}

impl Request for SetSystemVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/setsysvolume")
            .arg("volumeLevel", self.volume_level.to_string())
            .arg("component", &self.component)
            .arg("deviceIndex", &self.device_index)
    }
}

/// `POST os/setappvolume` — set one application's volume to an absolute
/// level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetAppVolume {
    pub process: String,
    pub volume_level: f32,
    pub device_index: String,
}

impl SetAppVolume {
    pub fn new(
        process: impl Into<String>,
        volume_level: f32,
        device_index: impl Into<String>,
    ) -> Self {
        Self {
            process: process.into(),
            volume_level,
            device_index: device_index.into(),
        }
    }
}

impl Request for SetAppVolume {
    type Reply = response::Ack;

    fn endpoint(&self) -> Endpoint {
        Endpoint::post("os/setappvolume")
            .arg("process", &self.process)
            .arg("volumeLevel", self.volume_level.to_string())
            .arg("deviceIndex", &self.device_index)
    }
}

/// The descriptor of every request kind, built from placeholder parameter
/// values. Diagnostics only — the CLI prints it as `hookshot endpoints`.
///
/// Statically maintained: a request kind missing here is a bug.
pub fn catalog() -> Vec<Endpoint> {
    vec![
        Api.endpoint(),
        Ping::default().endpoint(),
        Screen.endpoint(),
        ScreenInfo.endpoint(),
        OsSchema.endpoint(),
        Os.endpoint(),
        ServiceSchema.endpoint(),
        Service.endpoint(),
        Sleep.endpoint(),
        PowerOff.endpoint(),
        DatasetsSchema.endpoint(),
        Dataset::default().endpoint(),
        Processes.endpoint(),
        KillProcess::default().endpoint(),
        Drives.endpoint(),
        Files::default().endpoint(),
        RunFile::default().endpoint(),
        Beep::default().endpoint(),
        Speak::default().endpoint(),
        CdDrive::default().endpoint(),
        Monitor::default().endpoint(),
        ChangeSystemVolume::default().endpoint(),
        MuteSystemVolume::default().endpoint(),
        ChangeAppVolume::default().endpoint(),
        MuteAppVolume::default().endpoint(),
        SetSystemVolume::default().endpoint(),
        SetAppVolume::default().endpoint(),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Method;

    const ADDR: &str = "192.168.1.20:8080";

    #[test]
    fn api_asks_for_json() {
        let e = Api.endpoint();
        assert_eq!(e.method, Method::Get);
        assert_eq!(e.url(ADDR), "http://192.168.1.20:8080/api?format=json");
    }

    #[test]
    fn ping_carries_its_message() {
        let url = Ping::new("are you there").endpoint().url(ADDR);
        assert_eq!(url, "http://192.168.1.20:8080/ping?msg=are%20you%20there");
    }

    #[test]
    fn screen_endpoints() {
        assert_eq!(Screen.endpoint().url(ADDR), "http://192.168.1.20:8080/screen/now");
        assert_eq!(
            ScreenInfo.endpoint().url(ADDR),
            "http://192.168.1.20:8080/screen/info"
        );
    }

    #[test]
    fn power_operations_are_posts() {
        assert_eq!(Sleep.endpoint().method, Method::Post);
        assert_eq!(Sleep.endpoint().path, "os/sleep");
        assert_eq!(PowerOff.endpoint().method, Method::Post);
        assert_eq!(PowerOff.endpoint().path, "os/power-off");
    }

    #[test]
    fn dataset_embeds_name_and_omits_open_bounds() {
        let url = Dataset::new("cpu", None, None).endpoint().url(ADDR);
        assert_eq!(url, "http://192.168.1.20:8080/datasets/dataset/cpu");

        let url = Dataset::new("cpu", Some(1000), Some(2000)).endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/datasets/dataset/cpu?from=1000&to=2000"
        );

        let url = Dataset::new("cpu", None, Some(2000)).endpoint().url(ADDR);
        assert_eq!(url, "http://192.168.1.20:8080/datasets/dataset/cpu?to=2000");
    }

    #[test]
    fn kill_process_is_a_delete_with_pid_in_path() {
        let e = KillProcess::new(4242).endpoint();
        assert_eq!(e.method, Method::Delete);
        assert_eq!(e.url(ADDR), "http://192.168.1.20:8080/processes/4242");
    }

    #[test]
    fn files_encodes_its_path() {
        let url = Files::new("C:\\Program Files").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/filesystem/files?path=C%3A%5CProgram%20Files"
        );
    }

    #[test]
    fn run_file_repeats_args_in_order() {
        let url = RunFile::new("/bin/x", vec!["a".into(), "b".into()])
            .endpoint()
            .url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/filesystem/files/run?path=%2Fbin%2Fx&args=a&args=b"
        );
    }

    #[test]
    fn run_file_without_args_sends_only_path() {
        let url = RunFile::new("/bin/x", vec![]).endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/filesystem/files/run?path=%2Fbin%2Fx"
        );
    }

    #[test]
    fn beep_omits_unset_parameters() {
        let url = Beep::new(None, None).endpoint().url(ADDR);
        assert_eq!(url, "http://192.168.1.20:8080/os/beep");

        let url = Beep::new(Some(440), Some(250)).endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/beep?frequency=440&duration=250"
        );
    }

    #[test]
    fn speak_keeps_parameter_order() {
        let url = Speak::new("hello world", Some(1), None).endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/speak?text=hello%20world&rate=1"
        );
    }

    #[test]
    fn cd_drive_maps_bool_to_action() {
        assert!(CdDrive::new(true).endpoint().url(ADDR).ends_with("os/cdrom?action=open"));
        assert!(CdDrive::new(false).endpoint().url(ADDR).ends_with("os/cdrom?action=close"));
    }

    #[test]
    fn monitor_maps_bool_to_action() {
        assert!(Monitor::new(true).endpoint().url(ADDR).ends_with("os/monitor?action=on"));
        assert!(Monitor::new(false).endpoint().url(ADDR).ends_with("os/monitor?action=off"));
    }

    #[test]
    fn change_system_volume_query_order() {
        let url = ChangeSystemVolume::new(-2000, "master", "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/changesysvolume?volumeChange=-2000&component=master&deviceIndex=0"
        );
    }

    #[test]
    fn mute_system_volume_action_bit() {
        let url = MuteSystemVolume::new(true, "master", "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/mutesysvolume?action=1&component=master&deviceIndex=0"
        );
        let url = MuteSystemVolume::new(false, "master", "0").endpoint().url(ADDR);
        assert!(url.contains("action=0"));
    }

    #[test]
    fn set_system_volume_full_query() {
        let url = SetSystemVolume::new(32768, "master", "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/setsysvolume?volumeLevel=32768&component=master&deviceIndex=0"
        );
    }

    #[test]
    fn app_volume_queries() {
        let url = ChangeAppVolume::new("player.exe", 0.5, "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/changeappvolume?process=player.exe&volumeLevel=0.5&deviceIndex=0"
        );

        let url = MuteAppVolume::new("player.exe", true, "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/muteappvolume?process=player.exe&action=1&deviceIndex=0"
        );

        let url = SetAppVolume::new("player.exe", 0.25, "0").endpoint().url(ADDR);
        assert_eq!(
            url,
            "http://192.168.1.20:8080/os/setappvolume?process=player.exe&volumeLevel=0.25&deviceIndex=0"
        );
    }

    #[test]
    fn volume_bounds_match_the_device_range() {
        assert_eq!(SetSystemVolume::VOLUME_MIN, 0);
        assert_eq!(SetSystemVolume::VOLUME_MAX, 65535);
    }

    #[test]
    fn catalog_lists_every_request_kind_once() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 27);

        let mut seen: Vec<(Method, &str)> = Vec::new();
        for e in &catalog {
            let key = (e.method, e.path.as_str());
            assert!(!seen.contains(&key), "duplicate catalog entry {key:?}");
            seen.push(key);
        }
    }
}
