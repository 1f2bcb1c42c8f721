//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// STORE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Store backend identifiers
pub mod store_backends {
    pub const MEMORY: &str = "memory";
    pub const POSTGRES: &str = "postgres";
}

// =============================================================================
// ROSTER DEFAULTS
// =============================================================================

/// Display name given to an instructor created by promotion
pub const DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR: &str = "Instructor";

/// Team assigned to a student record re-created by a demotion
pub const DEFAULT_TEAM_NAME: &str = "Default Team";

/// Section assigned to a student record re-created by a demotion
pub const DEFAULT_SECTION_NAME: &str = "None";

/// Instructor permission role names
pub mod instructor_roles {
    pub const COOWNER: &str = "Co-owner";
    pub const MANAGER: &str = "Manager";
    pub const OBSERVER: &str = "Observer";
    pub const TUTOR: &str = "Tutor";
    pub const CUSTOM: &str = "Custom";

    /// All instructor permission role names
    pub const ALL: &[&str] = &[COOWNER, MANAGER, OBSERVER, TUTOR, CUSTOM];
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum course id length
pub const MAX_COURSE_ID_LENGTH: usize = 64;

/// Maximum person name length
pub const MAX_PERSON_NAME_LENGTH: u64 = 100;

/// Maximum email length
pub const MAX_EMAIL_LENGTH: u64 = 254;

/// Maximum team name length
pub const MAX_TEAM_NAME_LENGTH: u64 = 60;

/// Maximum section name length
pub const MAX_SECTION_NAME_LENGTH: u64 = 60;

/// Maximum student comment length
pub const MAX_COMMENT_LENGTH: u64 = 500;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
