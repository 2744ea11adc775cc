//! Couchbase cluster-wide settings (`spec.cluster`)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::IntOrString;

/// Settings applied to the Couchbase cluster as a whole
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSettings {
    /// Name displayed in the web console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    /// Memory allocated to the data service on every data node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_service_memory_quota: Option<IntOrString>,

    /// Memory allocated to the index service on every index node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_service_memory_quota: Option<IntOrString>,

    /// Memory allocated to the query service on every query node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_service_memory_quota: Option<IntOrString>,

    /// Memory allocated to the search service on every search node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_service_memory_quota: Option<IntOrString>,

    /// Memory allocated to the eventing service on every eventing node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eventing_service_memory_quota: Option<IntOrString>,

    /// Memory allocated to the analytics service on every analytics node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_service_memory_quota: Option<IntOrString>,

    /// Storage engine used by global secondary indexes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_storage_setting: Option<IndexStorageSetting>,

    /// Time a node must be unresponsive before it is failed over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_failover_timeout: Option<String>,

    /// Number of automatic failovers before manual intervention is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 3))]
    pub auto_failover_max_count: Option<i64>,

    /// Fail over nodes whose data disks are unresponsive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_failover_on_data_disk_issues: Option<bool>,

    /// Time a data disk must be unresponsive before failover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_failover_on_data_disk_issues_time_period: Option<String>,

    /// Fail over an entire server group when it becomes unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_failover_server_group: Option<bool>,

    /// Automatic compaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_compaction: Option<AutoCompaction>,

    /// Index service tuning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer: Option<Indexer>,

    /// Query service tuning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QuerySettings>,

    /// Data service tuning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataSettings>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IndexStorageSetting {
    MemoryOptimized,
    Plasma,
}

/// Compaction thresholds and schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoCompaction {
    /// Trigger database compaction at this fragmentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_fragmentation_threshold: Option<FragmentationThreshold>,

    /// Trigger view compaction at this fragmentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_fragmentation_threshold: Option<FragmentationThreshold>,

    /// Compact databases and views in parallel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_compaction: Option<bool>,

    /// Restrict compaction to a daily window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,

    /// Age after which deleted item tombstones are purged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tombstone_purge_interval: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FragmentationThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 2, max = 100))]
    pub percent: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<IntOrString>,
}

/// Daily compaction window, `HH:MM` in the cluster's local time
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d{2}:\d{2}$"))]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d{2}:\d{2}$"))]
    pub end: Option<String>,

    /// Stop running compactions when the window closes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_compaction_outside_window: Option<bool>,
}

/// Index service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Indexer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub threads: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<IndexerLogLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_rollback_points: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_snapshot_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_snapshot_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_mode: Option<IndexStorageSetting>,

    /// Default number of replicas for new indexes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 16))]
    pub num_replica: Option<i64>,

    /// Move indexes onto new nodes during a rebalance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redistribute_indexes: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexerLogLevel {
    Silent,
    Fatal,
    Error,
    Warn,
    Info,
    Verbose,
    Timing,
    Debug,
    Trace,
}

/// Query service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuerySettings {
    /// Spill query results to disk when memory runs low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backfill_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_space: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_space_unlimited: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub pipeline_batch: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub pipeline_cap: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub scan_cap: Option<i64>,

    /// Maximum query execution time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub prepared_limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<QueryLogLevel>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryLogLevel {
    Debug,
    Trace,
    Info,
    Warn,
    Error,
    Severe,
    None,
}

/// Data service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataSettings {
    /// Reader threads; a count or one of `default`, `disk_io_optimized`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_threads: Option<IntOrString>,

    /// Writer threads; a count or one of `default`, `disk_io_optimized`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer_threads: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 64))]
    pub non_io_threads: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 64))]
    pub aux_io_threads: Option<i64>,
}
