//! Wire layer for the Hookshot host-agent HTTP API.
//!
//! This crate encodes the agent's HTTP contract as Rust types: every
//! operation is a struct in [`request`] that describes itself as an
//! [`Endpoint`], paired through [`request::Request::Reply`] with the typed
//! response in [`response`] it decodes into. Everything here is pure — URL
//! strings in, typed values out — and the async client in
//! `hookshot-client` supplies the I/O.
//!
//! # Operations covered
//!
//! | Method | Path | Request → Reply |
//! |--------|------|-----------------|
//! | GET | `api` | [`request::Api`] → [`response::Api`] |
//! | GET | `ping` | [`request::Ping`] → [`response::Ping`] |
//! | GET | `screen/now` | [`request::Screen`] → [`response::Screen`] (raw bytes) |
//! | GET | `screen/info` | [`request::ScreenInfo`] → [`response::ScreenInfo`] |
//! | GET | `os/schema` | [`request::OsSchema`] → [`response::Schema`] |
//! | GET | `os/query` | [`request::Os`] → [`response::Os`] |
//! | GET | `service/schema` | [`request::ServiceSchema`] → [`response::Schema`] |
//! | GET | `service/query` | [`request::Service`] → [`response::Service`] |
//! | POST | `os/sleep` | [`request::Sleep`] → [`response::Ack`] |
//! | POST | `os/power-off` | [`request::PowerOff`] → [`response::Ack`] |
//! | GET | `datasets/schema` | [`request::DatasetsSchema`] → [`response::DatasetsSchema`] |
//! | GET | `datasets/dataset/{name}` | [`request::Dataset`] → [`response::Dataset`] |
//! | GET | `processes` | [`request::Processes`] → [`response::Processes`] |
//! | DELETE | `processes/{pid}` | [`request::KillProcess`] → [`response::KillProcess`] |
//! | GET | `filesystem/drives` | [`request::Drives`] → [`response::Drives`] |
//! | GET | `filesystem/files` | [`request::Files`] → [`response::Files`] |
//! | POST | `filesystem/files/run` | [`request::RunFile`] → [`response::Empty`] |
//! | POST | `os/beep` | [`request::Beep`] → [`response::Ack`] |
//! | POST | `os/speak` | [`request::Speak`] → [`response::Ack`] |
//! | POST | `os/cdrom` | [`request::CdDrive`] → [`response::Ack`] |
//! | POST | `os/monitor` | [`request::Monitor`] → [`response::Ack`] |
//! | POST | `os/changesysvolume` | [`request::ChangeSystemVolume`] → [`response::Ack`] |
//! | POST | `os/mutesysvolume` | [`request::MuteSystemVolume`] → [`response::Ack`] |
//! | POST | `os/changeappvolume` | [`request::ChangeAppVolume`] → [`response::Ack`] |
//! | POST | `os/muteappvolume` | [`request::MuteAppVolume`] → [`response::Ack`] |
//! | POST | `os/setsysvolume` | [`request::SetSystemVolume`] → [`response::Ack`] |
//! | POST | `os/setappvolume` | [`request::SetAppVolume`] → [`response::Ack`] |
//!
//! Response bodies are JSON except `screen/now`, whose body is the image
//! itself. Field names on the wire are case-sensitive camelCase (e.g.
//! `imagePath`, `residentSetSize`) and must match exactly.

pub mod decode;
pub mod endpoint;
pub mod request;
pub mod response;

pub use decode::{Decode, DecodeError};
pub use endpoint::{Endpoint, Method};
pub use request::Request;
