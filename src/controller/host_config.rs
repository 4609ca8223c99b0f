// ABOUTME: Engine-neutral value objects describing how a container is hosted.
// ABOUTME: Binds, links, volumes-from, exposed ports, port bindings and capabilities.

use std::collections::HashMap;
use std::fmt;

/// Transport protocol of an exposed port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Sctp => "sctp",
        }
    }
}

/// A container port, `8080/tcp` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExposedPort {
    pub port: u16,
    pub protocol: Protocol,
}

impl ExposedPort {
    pub fn tcp(port: u16) -> Self {
        Self {
            port,
            protocol: Protocol::Tcp,
        }
    }

    pub fn udp(port: u16) -> Self {
        Self {
            port,
            protocol: Protocol::Udp,
        }
    }

    /// Parse `8080/tcp`. A missing protocol means tcp.
    pub fn parse(input: &str) -> Option<Self> {
        let (port, protocol) = match input.split_once('/') {
            Some((port, "tcp")) => (port, Protocol::Tcp),
            Some((port, "udp")) => (port, Protocol::Udp),
            Some((port, "sctp")) => (port, Protocol::Sctp),
            Some(_) => return None,
            None => (input, Protocol::Tcp),
        };
        Some(Self {
            port: port.parse().ok()?,
            protocol,
        })
    }
}

impl fmt::Display for ExposedPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol.as_str())
    }
}

/// Host side of a published port. Empty fields let the engine choose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortBinding {
    pub host_ip: Option<String>,
    pub host_port: Option<u16>,
}

/// Read/write mode of a mounted volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    #[default]
    ReadWrite,
    ReadOnly,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::ReadWrite => "rw",
            AccessMode::ReadOnly => "ro",
        }
    }
}

/// Host path or named volume mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind {
    pub source: String,
    pub target: String,
    pub access_mode: AccessMode,
}

impl Bind {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            access_mode: AccessMode::ReadWrite,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.access_mode = AccessMode::ReadOnly;
        self
    }
}

impl fmt::Display for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source,
            self.target,
            self.access_mode.as_str()
        )
    }
}

/// Legacy container link, `name:alias` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub alias: String,
}

impl Link {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.alias)
    }
}

/// Mount all volumes of another container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumesFrom {
    pub container: String,
    pub access_mode: AccessMode,
}

impl VolumesFrom {
    pub fn new(container: impl Into<String>, access_mode: AccessMode) -> Self {
        Self {
            container: container.into(),
            access_mode,
        }
    }
}

impl fmt::Display for VolumesFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.container, self.access_mode.as_str())
    }
}

macro_rules! capabilities {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Linux capability added to a container.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Capability {
            $($variant),+
        }

        impl Capability {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Capability::$variant => $name),+
                }
            }
        }
    };
}

capabilities! {
    All => "ALL",
    AuditControl => "AUDIT_CONTROL",
    AuditWrite => "AUDIT_WRITE",
    BlockSuspend => "BLOCK_SUSPEND",
    Chown => "CHOWN",
    DacOverride => "DAC_OVERRIDE",
    DacReadSearch => "DAC_READ_SEARCH",
    Fowner => "FOWNER",
    Fsetid => "FSETID",
    IpcLock => "IPC_LOCK",
    IpcOwner => "IPC_OWNER",
    Kill => "KILL",
    Lease => "LEASE",
    LinuxImmutable => "LINUX_IMMUTABLE",
    MacAdmin => "MAC_ADMIN",
    MacOverride => "MAC_OVERRIDE",
    Mknod => "MKNOD",
    NetAdmin => "NET_ADMIN",
    NetBindService => "NET_BIND_SERVICE",
    NetBroadcast => "NET_BROADCAST",
    NetRaw => "NET_RAW",
    Setfcap => "SETFCAP",
    Setgid => "SETGID",
    Setpcap => "SETPCAP",
    Setuid => "SETUID",
    SysAdmin => "SYS_ADMIN",
    SysBoot => "SYS_BOOT",
    SysChroot => "SYS_CHROOT",
    Syslog => "SYSLOG",
    SysModule => "SYS_MODULE",
    SysNice => "SYS_NICE",
    SysPacct => "SYS_PACCT",
    SysPtrace => "SYS_PTRACE",
    SysRawio => "SYS_RAWIO",
    SysResource => "SYS_RESOURCE",
    SysTime => "SYS_TIME",
    SysTtyConfig => "SYS_TTY_CONFIG",
    WakeAlarm => "WAKE_ALARM",
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-side configuration of a container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
    pub binds: Vec<Bind>,
    pub links: Vec<Link>,
    pub volumes_from: Vec<VolumesFrom>,
    /// `bridge`, `host`, `none`, `container:<id>` or a network name.
    pub network_mode: Option<String>,
    /// `hostname:ip` entries added to `/etc/hosts`.
    pub extra_hosts: Vec<String>,
    pub privileged: bool,
    pub cap_add: Vec<Capability>,
    pub port_bindings: HashMap<ExposedPort, Vec<PortBinding>>,
    pub publish_all_ports: bool,
    /// Memory limit in bytes.
    pub memory: Option<u64>,
    /// Size of `/dev/shm` in bytes.
    pub shm_size: Option<u64>,
    /// Mount point to tmpfs options.
    pub tmpfs: HashMap<String, String>,
    pub auto_remove: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_formats() {
        assert_eq!(ExposedPort::tcp(8080).to_string(), "8080/tcp");
        assert_eq!(Bind::new("/host", "/data").read_only().to_string(), "/host:/data:ro");
        assert_eq!(Link::new("db", "database").to_string(), "db:database");
        assert_eq!(
            VolumesFrom::new("data", AccessMode::ReadWrite).to_string(),
            "data:rw"
        );
        assert_eq!(Capability::NetAdmin.to_string(), "NET_ADMIN");
    }

    #[test]
    fn exposed_port_parsing() {
        assert_eq!(ExposedPort::parse("53/udp"), Some(ExposedPort::udp(53)));
        assert_eq!(ExposedPort::parse("80"), Some(ExposedPort::tcp(80)));
        assert_eq!(ExposedPort::parse("80/quic"), None);
        assert_eq!(ExposedPort::parse("http/tcp"), None);
    }
}
