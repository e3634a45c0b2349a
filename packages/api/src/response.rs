//! Typed responses for every host-agent operation.
//!
//! Four shape families cover the whole catalog:
//!
//! | Family | Types |
//! |--------|-------|
//! | Empty | [`Empty`] |
//! | Error envelope | [`Ack`], [`KillProcess`] |
//! | Schema list | [`Schema`] |
//! | Structured record | everything else |
//!
//! Each type's [`Decode`] impl reads its own subset of the JSON document
//! through the accessors in [`crate::decode`]; unknown fields are ignored.
//! [`Screen`] is the one non-JSON response — the body is the image itself.

use serde_json::Value;

use crate::decode::{
    self, array, array_or_empty, boolean, field, int, opt_string, string, Decode, DecodeError,
};

/// No payload; success is inferred from the HTTP status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Empty;

impl Decode for Empty {
    fn decode(_body: &[u8]) -> Result<Self, DecodeError> {
        Ok(Empty)
    }
}

/// The `{"error": string|null}` envelope shared by every fire-and-forget
/// control operation (sleep, power-off, beep, speak, cdrom, monitor, and
/// all volume operations).
///
/// A `null` or absent `error` means the agent accepted the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub error: Option<String>,
}

impl Ack {
    /// `true` when the agent reported no error.
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Decode for Ack {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Ack {
            error: opt_string(&doc, "error"),
        })
    }
}

/// `{"fields": [...]}` — reply of the introspection endpoints
/// (`os/schema`, `service/schema`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub fields: Vec<String>,
}

impl Decode for Schema {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Schema {
            fields: array(&doc, "fields", |e| e.as_str().map(str::to_string))?,
        })
    }
}

/// One entry in the agent's endpoint index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointEntry {
    pub path: String,
    pub method: String,
}

/// Reply of `GET api?format=json` — the agent's self-reported endpoint
/// index. A `null` index decodes as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Api {
    pub endpoints: Vec<EndpointEntry>,
}

impl Decode for Api {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Api {
            endpoints: array_or_empty(&doc, "api", |e| {
                Some(EndpointEntry {
                    path: string(e, "path"),
                    method: string(e, "method"),
                })
            })?,
        })
    }
}

/// Reply of `GET ping` — the agent echoes the message back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub msg: String,
}

impl Decode for Ping {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Ping {
            msg: string(&doc, "msg"),
        })
    }
}

/// Reply of `GET screen/now`: the raw capture bytes, no JSON involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub bytes: Vec<u8>,
}

impl Decode for Screen {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(Screen {
            bytes: body.to_vec(),
        })
    }
}

/// Reply of `GET screen/info` — where the agent stores captures and how
/// often it refreshes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    pub image_path: String,
    pub when_captured: String,
    pub period: i64,
}

impl Decode for ScreenInfo {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(ScreenInfo {
            image_path: string(&doc, "imagePath"),
            when_captured: string(&doc, "whenCaptured"),
            period: int(&doc, "period")?,
        })
    }
}

/// Per-core time counters inside [`Cpu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: i64,
    pub nice: i64,
    pub sys: i64,
    pub idle: i64,
    pub irq: i64,
}

fn cpu_times(value: &Value) -> Option<CpuTimes> {
    Some(CpuTimes {
        user: value.get("user")?.as_i64()?,
        nice: value.get("nice")?.as_i64()?,
        sys: value.get("sys")?.as_i64()?,
        idle: value.get("idle")?.as_i64()?,
        irq: value.get("irq")?.as_i64()?,
    })
}

/// One logical CPU in the [`Os`] report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    pub model: String,
    pub speed: i64,
    pub times: CpuTimes,
}

fn cpu(value: &Value) -> Option<Cpu> {
    Some(Cpu {
        model: string(value, "model"),
        speed: value.get("speed")?.as_i64()?,
        times: cpu_times(value.get("times")?)?,
    })
}

/// Reply of `GET os/query` — host OS identity, memory, and per-CPU times.
/// The record is nested under the wire document's `result` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Os {
    pub eol: String,
    pub arch: String,
    pub release: String,
    pub cpus: Vec<Cpu>,
    pub freemem: i64,
    pub usedmem: i64,
    pub totalmem: i64,
    pub uptime: String,
}

impl Decode for Os {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        let result = field(&doc, "result")?;
        Ok(Os {
            eol: string(result, "eol"),
            arch: string(result, "arch"),
            release: string(result, "release"),
            cpus: array(result, "cpus", cpu)?,
            freemem: int(result, "freemem")?,
            usedmem: int(result, "usedmem")?,
            totalmem: int(result, "totalmem")?,
            uptime: string(result, "uptime"),
        })
    }
}

/// Agent process memory counters inside [`Service`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUsage {
    pub resident_set_size: i64,
    pub heap_total: i64,
    pub heap_used: i64,
}

/// One runtime component version inside [`Service`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub name: String,
    pub version: String,
}

/// Reply of `GET service/query` — the agent's own vitals. Nested under
/// `result`; `versions` arrives as a JSON object map and flattens to
/// name/version pairs (a non-object decodes as empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub memory: MemoryUsage,
    pub version: String,
    pub versions: Vec<RuntimeVersion>,
}

impl Decode for Service {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        let result = field(&doc, "result")?;
        let memory = field(result, "memory")?;
        let versions = match result.get("versions").and_then(Value::as_object) {
            Some(map) => map
                .iter()
                .map(|(name, version)| RuntimeVersion {
                    name: name.clone(),
                    version: version.as_str().unwrap_or_default().to_string(),
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(Service {
            memory: MemoryUsage {
                resident_set_size: int(memory, "residentSetSize")?,
                heap_total: int(memory, "heapTotal")?,
                heap_used: int(memory, "heapUsed")?,
            },
            version: string(result, "version"),
            versions,
        })
    }
}

/// Descriptor of one dataset the agent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    pub name: String,
    pub timestamp_offset: i64,
    pub period: i64,
    pub limit: i64,
}

/// Reply of `GET datasets/schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetsSchema {
    pub datasets: Vec<DatasetSchema>,
}

impl Decode for DatasetsSchema {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(DatasetsSchema {
            datasets: array(&doc, "datasets", |e| {
                Some(DatasetSchema {
                    name: string(e, "name"),
                    timestamp_offset: e.get("timestampOffset")?.as_i64()?,
                    period: e.get("period")?.as_i64()?,
                    limit: e.get("limit")?.as_i64()?,
                })
            })?,
        })
    }
}

/// One telemetry sample in a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub timestamp: i64,
    pub value: f64,
}

/// Reply of `GET datasets/dataset/{name}`. A `null` series decodes as
/// empty — a dataset that has not accumulated samples yet is not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub points: Vec<DataPoint>,
}

impl Decode for Dataset {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Dataset {
            points: array_or_empty(&doc, "dataset", |e| {
                Some(DataPoint {
                    timestamp: e.get("timestamp")?.as_i64()?,
                    value: e.get("value")?.as_f64()?,
                })
            })?,
        })
    }
}

/// One process row in [`Processes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub image_name: String,
    pub pid: i64,
    pub session_name: String,
    pub session_number: i64,
    pub mem_usage: i64,
    pub status: String,
    pub username: String,
    pub cpu_time: i64,
    pub window_title: String,
}

fn process(value: &Value) -> Option<Process> {
    Some(Process {
        image_name: string(value, "imageName"),
        pid: value.get("pid")?.as_i64()?,
        session_name: string(value, "sessionName"),
        session_number: value.get("sessionNumber")?.as_i64()?,
        mem_usage: value.get("memUsage")?.as_i64()?,
        status: string(value, "status"),
        username: string(value, "username"),
        cpu_time: value.get("cpuTime")?.as_i64()?,
        window_title: string(value, "windowTitle"),
    })
}

/// Reply of `GET processes` — the agent's process table snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processes {
    pub last_updated: i64,
    pub processes: Vec<Process>,
}

impl Decode for Processes {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Processes {
            last_updated: int(&doc, "lastUpdated")?,
            processes: array(&doc, "processes", process)?,
        })
    }
}

/// Reply of `DELETE processes/{pid}` — whether the kill took, plus the
/// agent's error text when it did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillProcess {
    pub result: bool,
    pub error: Option<String>,
}

impl Decode for KillProcess {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(KillProcess {
            result: boolean(&doc, "result")?,
            error: opt_string(&doc, "error"),
        })
    }
}

/// One mounted drive in [`Drives`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drive {
    pub name: String,
    pub volume_name: String,
}

/// Reply of `GET filesystem/drives`. A `null` list decodes as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drives {
    pub drives: Vec<Drive>,
}

impl Decode for Drives {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Drives {
            drives: array_or_empty(&doc, "drives", |e| {
                Some(Drive {
                    name: string(e, "name"),
                    volume_name: string(e, "volumeName"),
                })
            })?,
        })
    }
}

/// One directory entry in [`Files`]. `kind` is the wire field `type`
/// (`"file"` or `"directory"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub ext: String,
    pub kind: String,
}

/// Reply of `GET filesystem/files?path=…`. A `null` listing decodes as
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Files {
    pub files: Vec<FileEntry>,
}

impl Decode for Files {
    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let doc = decode::document(body)?;
        Ok(Files {
            files: array_or_empty(&doc, "files", |e| {
                Some(FileEntry {
                    name: string(e, "name"),
                    path: string(e, "path"),
                    ext: string(e, "ext"),
                    kind: string(e, "type"),
                })
            })?,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ignores_any_body() {
        assert_eq!(Empty::decode(b"").unwrap(), Empty);
        assert_eq!(Empty::decode(b"not json at all").unwrap(), Empty);
    }

    #[test]
    fn ack_with_null_error_is_ok() {
        let ack = Ack::decode(br#"{"error": null}"#).unwrap();
        assert_eq!(ack.error, None);
        assert!(ack.ok());
    }

    #[test]
    fn ack_with_missing_error_is_ok() {
        assert!(Ack::decode(br"{}").unwrap().ok());
    }

    #[test]
    fn ack_carries_error_text() {
        let ack = Ack::decode(br#"{"error": "access denied"}"#).unwrap();
        assert_eq!(ack.error.as_deref(), Some("access denied"));
        assert!(!ack.ok());
    }

    #[test]
    fn ack_rejects_non_json() {
        assert!(matches!(
            Ack::decode(b"<html>"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn schema_decodes_field_names() {
        let schema = Schema::decode(br#"{"fields": ["arch", "release"]}"#).unwrap();
        assert_eq!(schema.fields, vec!["arch", "release"]);
    }

    #[test]
    fn schema_requires_the_field_list() {
        assert!(matches!(
            Schema::decode(br#"{"fields": null}"#),
            Err(DecodeError::MissingField("fields"))
        ));
    }

    #[test]
    fn api_index_decodes_and_tolerates_null() {
        let api =
            Api::decode(br#"{"api": [{"path": "ping", "method": "GET"}]}"#).unwrap();
        assert_eq!(api.endpoints.len(), 1);
        assert_eq!(api.endpoints[0].path, "ping");
        assert_eq!(api.endpoints[0].method, "GET");

        let empty = Api::decode(br#"{"api": null}"#).unwrap();
        assert!(empty.endpoints.is_empty());
    }

    #[test]
    fn screen_is_raw_bytes() {
        let body = [0x89, b'P', b'N', b'G', 0x00, 0xff];
        assert_eq!(Screen::decode(&body).unwrap().bytes, body);
    }

    #[test]
    fn screen_info_requires_period() {
        let ok = ScreenInfo::decode(
            br#"{"imagePath": "/tmp/s.png", "whenCaptured": "now", "period": 5}"#,
        )
        .unwrap();
        assert_eq!(ok.image_path, "/tmp/s.png");
        assert_eq!(ok.period, 5);

        assert!(matches!(
            ScreenInfo::decode(br#"{"imagePath": "/tmp/s.png"}"#),
            Err(DecodeError::MissingField("period"))
        ));
    }

    fn os_body() -> Vec<u8> {
        br#"{"result": {
            "eol": "\n", "arch": "x64", "release": "10.0.19045",
            "cpus": [
                {"model": "Xeon", "speed": 3400,
                 "times": {"user": 1, "nice": 0, "sys": 2, "idle": 3, "irq": 4}}
            ],
            "freemem": 1024, "usedmem": 2048, "totalmem": 3072,
            "uptime": "86400",
            "extraneous": true
        }}"#
        .to_vec()
    }

    #[test]
    fn os_decodes_nested_record() {
        let os = Os::decode(&os_body()).unwrap();
        assert_eq!(os.arch, "x64");
        assert_eq!(os.cpus.len(), 1);
        assert_eq!(os.cpus[0].times.idle, 3);
        assert_eq!(os.totalmem, 3072);
        assert_eq!(os.uptime, "86400");
    }

    #[test]
    fn os_malformed_cpu_aborts_decode() {
        let body = br#"{"result": {
            "eol": "", "arch": "x64", "release": "r",
            "cpus": [{"model": "m", "speed": "not a number", "times": {}}],
            "freemem": 0, "usedmem": 0, "totalmem": 0, "uptime": ""
        }}"#;
        assert!(matches!(
            Os::decode(body),
            Err(DecodeError::MalformedElement("cpus"))
        ));
    }

    #[test]
    fn service_flattens_versions_map() {
        let body = br#"{"result": {
            "memory": {"residentSetSize": 100, "heapTotal": 50, "heapUsed": 25},
            "version": "2.1.0",
            "versions": {"node": "18.2.0", "v8": "10.1"}
        }}"#;
        let service = Service::decode(body).unwrap();
        assert_eq!(service.memory.resident_set_size, 100);
        assert_eq!(service.version, "2.1.0");
        assert_eq!(service.versions.len(), 2);
        assert!(service
            .versions
            .iter()
            .any(|v| v.name == "node" && v.version == "18.2.0"));
    }

    #[test]
    fn service_non_object_versions_decode_empty() {
        let body = br#"{"result": {
            "memory": {"residentSetSize": 1, "heapTotal": 2, "heapUsed": 3},
            "version": "2.1.0",
            "versions": null
        }}"#;
        assert!(Service::decode(body).unwrap().versions.is_empty());
    }

    #[test]
    fn datasets_schema_is_strict() {
        let ok = DatasetsSchema::decode(
            br#"{"datasets": [
                {"name": "cpu", "timestampOffset": 0, "period": 1000, "limit": 300}
            ]}"#,
        )
        .unwrap();
        assert_eq!(ok.datasets[0].name, "cpu");

        assert!(matches!(
            DatasetsSchema::decode(br#"{"datasets": null}"#),
            Err(DecodeError::MissingField("datasets"))
        ));
    }

    #[test]
    fn dataset_null_series_is_empty() {
        assert!(Dataset::decode(br#"{"dataset": null}"#)
            .unwrap()
            .points
            .is_empty());
    }

    #[test]
    fn dataset_decodes_points_in_order() {
        let d = Dataset::decode(
            br#"{"dataset": [
                {"timestamp": 1000, "value": 0.5},
                {"timestamp": 2000, "value": 0.75}
            ]}"#,
        )
        .unwrap();
        assert_eq!(d.points.len(), 2);
        assert_eq!(d.points[0].timestamp, 1000);
        assert_eq!(d.points[1].value, 0.75);
    }

    #[test]
    fn dataset_malformed_point_aborts() {
        assert!(matches!(
            Dataset::decode(br#"{"dataset": [{"timestamp": "soon", "value": 1}]}"#),
            Err(DecodeError::MalformedElement("dataset"))
        ));
    }

    #[test]
    fn processes_decode_with_null_strings() {
        let body = br#"{"lastUpdated": 1700000000000, "processes": [
            {"imageName": "agent.exe", "pid": 42, "sessionName": "Console",
             "sessionNumber": 1, "memUsage": 1048576, "status": "Running",
             "username": null, "cpuTime": 12, "windowTitle": null}
        ]}"#;
        let p = Processes::decode(body).unwrap();
        assert_eq!(p.last_updated, 1_700_000_000_000);
        assert_eq!(p.processes[0].pid, 42);
        assert_eq!(p.processes[0].username, "");
        assert_eq!(p.processes[0].window_title, "");
    }

    #[test]
    fn processes_missing_pid_is_malformed() {
        let body = br#"{"lastUpdated": 0, "processes": [{"imageName": "x"}]}"#;
        assert!(matches!(
            Processes::decode(body),
            Err(DecodeError::MalformedElement("processes"))
        ));
    }

    #[test]
    fn kill_process_decodes_both_fields() {
        let ok = KillProcess::decode(br#"{"result": true, "error": null}"#).unwrap();
        assert!(ok.result);
        assert_eq!(ok.error, None);

        let denied =
            KillProcess::decode(br#"{"result": false, "error": "no such pid"}"#).unwrap();
        assert!(!denied.result);
        assert_eq!(denied.error.as_deref(), Some("no such pid"));
    }

    #[test]
    fn drives_null_is_empty_not_an_error() {
        assert!(Drives::decode(br#"{"drives": null}"#)
            .unwrap()
            .drives
            .is_empty());
    }

    #[test]
    fn drives_keep_empty_volume_names() {
        let d = Drives::decode(br#"{"drives": [{"name": "C:", "volumeName": ""}]}"#).unwrap();
        assert_eq!(d.drives.len(), 1);
        assert_eq!(d.drives[0].name, "C:");
        assert_eq!(d.drives[0].volume_name, "");
    }

    #[test]
    fn files_null_is_empty_and_type_maps_to_kind() {
        assert!(Files::decode(br#"{"files": null}"#).unwrap().files.is_empty());

        let f = Files::decode(
            br#"{"files": [
                {"name": "tools", "path": "C:\\tools", "ext": "", "type": "directory"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(f.files[0].kind, "directory");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let ping = Ping::decode(br#"{"msg": "hi", "ttl": 9, "extra": {"a": 1}}"#).unwrap();
        assert_eq!(ping.msg, "hi");
    }
}
