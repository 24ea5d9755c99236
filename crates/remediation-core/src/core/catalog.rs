// crates/remediation-core/src/core/catalog.rs
// ============================================================================
// Module: Action Catalog
// Description: Static metric-name to remediation-action table.
// Purpose: Resolve exactly one action descriptor for any metric name.
// Dependencies: crate::core::{action, reasoning}
// ============================================================================

//! ## Overview
//! The catalog is process-wide constant data. The base table covers CPU,
//! database connection, and disk space alarms; the extended table adds the
//! critical-shutdown metrics (memory, JVM heap, file descriptors, thread
//! pools, network, disk queue depth, deadlocks, DNS, circuit breakers) and is
//! opt-in. Lookup is total: unmapped metrics resolve to `investigate` with no
//! command.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::action::ActionDescriptor;
use crate::core::action::ActionKind;
use crate::core::action::CommandSpec;
use crate::core::reasoning::ReasoningResult;

// ============================================================================
// SECTION: Catalog Entries
// ============================================================================

/// Static command template attached to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandTemplate {
    /// Automation document.
    Automation(&'static str),
    /// Command document.
    Document(&'static str),
    /// Shell command template.
    Shell(&'static str),
}

impl CommandTemplate {
    /// Converts the static template into an owned command spec.
    fn to_spec(self) -> CommandSpec {
        match self {
            Self::Automation(document) => CommandSpec::Automation {
                document: document.to_string(),
            },
            Self::Document(document) => CommandSpec::Document {
                document: document.to_string(),
            },
            Self::Shell(template) => CommandSpec::Shell {
                template: template.to_string(),
            },
        }
    }
}

/// One row of the action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Metric name the entry matches.
    metric_name: &'static str,
    /// Action kind for the metric.
    kind: ActionKind,
    /// Human description of the action.
    description: &'static str,
    /// Parameter template.
    parameters: &'static [(&'static str, &'static str)],
    /// Command template, absent for manual actions.
    command: Option<CommandTemplate>,
}

impl CatalogEntry {
    /// Returns the metric name the entry matches.
    #[must_use]
    pub const fn metric_name(&self) -> &'static str {
        self.metric_name
    }

    /// Returns the action kind.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Builds a descriptor carrying the given reasoning.
    fn descriptor(&self, reasoning: &ReasoningResult) -> ActionDescriptor {
        ActionDescriptor {
            kind: self.kind,
            description: self.description.to_string(),
            parameters: self
                .parameters
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect::<BTreeMap<_, _>>(),
            command: self.command.map(CommandTemplate::to_spec),
            reasoning: reasoning.text.clone(),
            confidence: reasoning.confidence,
            safety_override: false,
        }
    }
}

/// Fallback entry for metrics absent from the table.
const INVESTIGATE_ENTRY: CatalogEntry = CatalogEntry {
    metric_name: "*",
    kind: ActionKind::Investigate,
    description: "Manual investigation required",
    parameters: &[],
    command: None,
};

/// Base action table.
const BASE_ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        metric_name: "CPUUtilization",
        kind: ActionKind::ScaleInstance,
        description: "Scale EC2 Auto Scaling Group",
        parameters: &[("AutoScalingGroupName", "default-asg"), ("DesiredCapacity", "3")],
        command: Some(CommandTemplate::Automation("RemediationGate-ScaleAutoScalingGroup")),
    },
    CatalogEntry {
        metric_name: "DatabaseConnections",
        kind: ActionKind::RestartService,
        description: "Restart database service",
        parameters: &[("ServiceName", "mysql")],
        command: Some(CommandTemplate::Document("RemediationGate-RestartService")),
    },
    CatalogEntry {
        metric_name: "DiskSpaceUtilization",
        kind: ActionKind::CleanupLogs,
        description: "Clean up old log files",
        parameters: &[("LogPath", "/var/log"), ("DaysOld", "7")],
        command: Some(CommandTemplate::Shell(
            "find {LogPath} -name \"*.log\" -mtime +{DaysOld} -delete",
        )),
    },
];

/// Critical-shutdown additions to the base table.
const EXTENDED_ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        metric_name: "MemoryUtilization",
        kind: ActionKind::RestartContainerIncreaseMemory,
        description: "Restart container with increased memory limits",
        parameters: &[
            ("ServiceName", "web-service"),
            ("MemoryReservation", "2048"),
            ("RestartPolicy", "immediate"),
        ],
        command: Some(CommandTemplate::Document("RemediationGate-RestartContainer")),
    },
    CatalogEntry {
        metric_name: "JVMMemoryUsed",
        kind: ActionKind::RestartJvmIncreaseHeap,
        description: "Restart JVM with larger heap size",
        parameters: &[("ServiceName", "java-app"), ("HeapSize", "4g"), ("GCSettings", "G1GC")],
        command: Some(CommandTemplate::Document("RemediationGate-RestartJvm")),
    },
    CatalogEntry {
        metric_name: "FileDescriptorUtilization",
        kind: ActionKind::RestartServiceIncreaseLimits,
        description: "Restart service with increased file descriptor limits",
        parameters: &[("ServiceName", "app-service"), ("FileDescriptorLimit", "65536")],
        command: Some(CommandTemplate::Document("RemediationGate-RestartServiceWithLimits")),
    },
    CatalogEntry {
        metric_name: "ThreadPoolUtilization",
        kind: ActionKind::RestartAppIncreaseThreads,
        description: "Restart application with larger thread pool",
        parameters: &[("ServiceName", "worker-service"), ("ThreadPoolSize", "200")],
        command: Some(CommandTemplate::Document("RemediationGate-RestartApplication")),
    },
    CatalogEntry {
        metric_name: "NetworkConnections",
        kind: ActionKind::RestartServiceTuneNetwork,
        description: "Restart service with network tuning",
        parameters: &[("ServiceName", "api-service"), ("NetworkOptimization", "true")],
        command: Some(CommandTemplate::Document("RemediationGate-TuneNetwork")),
    },
    CatalogEntry {
        metric_name: "DiskQueueDepth",
        kind: ActionKind::ScaleStoragePerformance,
        description: "Scale storage performance tier",
        parameters: &[("VolumeId", "vol-xxx"), ("IOPS", "3000"), ("VolumeType", "gp3")],
        command: Some(CommandTemplate::Automation("RemediationGate-ModifyVolume")),
    },
    CatalogEntry {
        metric_name: "DeadlockCount",
        kind: ActionKind::RestartApplicationImmediately,
        description: "Emergency restart due to deadlock",
        parameters: &[
            ("ServiceName", "app-service"),
            ("RestartType", "force"),
            ("HealthCheckGracePeriod", "30"),
        ],
        command: Some(CommandTemplate::Shell(
            "sudo systemctl kill --signal=SIGKILL {ServiceName} && sudo systemctl start \
             {ServiceName}",
        )),
    },
    CatalogEntry {
        metric_name: "DNSQueryTime",
        kind: ActionKind::RestartDnsCacheService,
        description: "Restart DNS cache and resolver",
        parameters: &[("ServiceName", "dns-cache"), ("FlushCache", "true")],
        command: Some(CommandTemplate::Shell("sudo systemctl restart {ServiceName}")),
    },
    CatalogEntry {
        metric_name: "CircuitBreakerState",
        kind: ActionKind::RestartDependentServices,
        description: "Restart services in dependency chain",
        parameters: &[("ServiceGroup", "api-tier"), ("RestartOrder", "reverse-dependency")],
        command: Some(CommandTemplate::Automation("RemediationGate-RestartServiceGroup")),
    },
];

// ============================================================================
// SECTION: Action Catalog
// ============================================================================

/// Read-only view over the action table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    /// Whether the critical-shutdown entries are consulted.
    extended: bool,
}

impl ActionCatalog {
    /// Returns the base catalog.
    #[must_use]
    pub const fn base() -> Self {
        Self {
            extended: false,
        }
    }

    /// Returns the catalog including critical-shutdown entries.
    #[must_use]
    pub const fn extended() -> Self {
        Self {
            extended: true,
        }
    }

    /// Returns true when critical-shutdown entries are consulted.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        self.extended
    }

    /// Iterates the entries visible through this catalog.
    pub fn entries(self) -> impl Iterator<Item = &'static CatalogEntry> {
        let extended: &'static [CatalogEntry] = if self.extended { EXTENDED_ENTRIES } else { &[] };
        BASE_ENTRIES.iter().chain(extended.iter())
    }

    /// Looks up the entry for a metric name.
    #[must_use]
    pub fn lookup(self, metric_name: &str) -> Option<&'static CatalogEntry> {
        self.entries().find(|entry| entry.metric_name == metric_name)
    }

    /// Resolves a descriptor for the metric, falling back to `investigate`.
    #[must_use]
    pub fn resolve(self, metric_name: &str, reasoning: &ReasoningResult) -> ActionDescriptor {
        self.lookup(metric_name).unwrap_or(&INVESTIGATE_ENTRY).descriptor(reasoning)
    }
}
