//! Stable identifiers for policy rules.
//!
//! `rule` IDs are a dotted namespace: `<kind>.<rule_name>`.

// bucket
pub const RULE_BUCKET_TRANSPORT_ENCRYPTION: &str = "bucket.transport_encryption";
pub const RULE_BUCKET_PUBLIC_ACCESS: &str = "bucket.public_access";
pub const RULE_BUCKET_ENCRYPTION: &str = "bucket.encryption";

// crypto key
pub const RULE_KEY_ROTATION: &str = "key.rotation";

// distribution
pub const RULE_DISTRIBUTION_PROTOCOL_POLICY: &str = "distribution.protocol_policy";
pub const RULE_DISTRIBUTION_LOGGING: &str = "distribution.logging";
pub const RULE_DISTRIBUTION_WEB_ACL: &str = "distribution.web_acl";

// database instance
pub const RULE_DATABASE_PUBLICLY_ACCESSIBLE: &str = "database.publicly_accessible";
pub const RULE_DATABASE_STORAGE_ENCRYPTED: &str = "database.storage_encrypted";
pub const RULE_DATABASE_IAM_AUTHENTICATION: &str = "database.iam_authentication";
pub const RULE_DATABASE_AUTO_MINOR_VERSION_UPGRADE: &str = "database.auto_minor_version_upgrade";
pub const RULE_DATABASE_COPY_TAGS_TO_SNAPSHOT: &str = "database.copy_tags_to_snapshot";
pub const RULE_DATABASE_DELETION_PROTECTION: &str = "database.deletion_protection";
pub const RULE_DATABASE_MULTI_AZ: &str = "database.multi_az";

// database cluster
pub const RULE_CLUSTER_STORAGE_ENCRYPTED: &str = "cluster.storage_encrypted";
pub const RULE_CLUSTER_IAM_AUTHENTICATION: &str = "cluster.iam_authentication";
pub const RULE_CLUSTER_COPY_TAGS_TO_SNAPSHOT: &str = "cluster.copy_tags_to_snapshot";
pub const RULE_CLUSTER_DELETION_PROTECTION: &str = "cluster.deletion_protection";
pub const RULE_CLUSTER_INSTANCE_PUBLICLY_ACCESSIBLE: &str = "cluster.instance_publicly_accessible";
pub const RULE_CLUSTER_INSTANCE_AUTO_MINOR_VERSION_UPGRADE: &str =
    "cluster.instance_auto_minor_version_upgrade";

// queue
pub const RULE_QUEUE_ENCRYPTION: &str = "queue.encryption";

// topic
pub const RULE_TOPIC_ENCRYPTION_KEY: &str = "topic.encryption_key";

// load balancer
pub const RULE_LOAD_BALANCER_ACCESS_LOGS: &str = "load_balancer.access_logs";
pub const RULE_LOAD_BALANCER_DROP_INVALID_HEADERS: &str = "load_balancer.drop_invalid_headers";
pub const RULE_LOAD_BALANCER_DELETION_PROTECTION: &str = "load_balancer.deletion_protection";

// compute instance
pub const RULE_COMPUTE_IMDSV2: &str = "compute.imdsv2";
pub const RULE_COMPUTE_NO_SSH_KEY: &str = "compute.no_ssh_key";
pub const RULE_COMPUTE_INSTANCE_CLASS: &str = "compute.instance_class";

// serverless function
pub const RULE_FUNCTION_RUNTIME: &str = "function.runtime";

// log group
pub const RULE_LOG_GROUP_RETENTION: &str = "log_group.retention";
