//! Domain Enums
//!
//! String-backed enums stored in `TEXT` columns and exchanged as snake_case
//! JSON strings. Each has `as_str`/`FromStr` so database rows can be decoded
//! without a custom Postgres type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SharedError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored/wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(SharedError::invalid_value($kind, other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = SharedError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Account role. The first two belong to the recruiting half of the
    /// platform, the last two to the creator half.
    Role, "role" {
        JobSeeker => "job_seeker",
        Employer => "employer",
        User => "user",
        Creator => "creator",
    }
}

impl Role {
    /// Job seekers and employers sign up with first/last names
    pub fn is_recruiting(&self) -> bool {
        matches!(self, Role::JobSeeker | Role::Employer)
    }
}

string_enum! {
    /// Employment type of a job posting
    JobType, "job type" {
        FullTime => "full_time",
        PartTime => "part_time",
        Contract => "contract",
        Internship => "internship",
        Temporary => "temporary",
    }
}

string_enum! {
    /// Application status. Updates overwrite it directly.
    ApplicationStatus, "application status" {
        Submitted => "submitted",
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

string_enum! {
    /// Creator verification state
    VerificationStatus, "verification status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

string_enum! {
    /// Kind of media attached to a post
    MediaType, "media type" {
        Image => "image",
        Video => "video",
    }
}

impl MediaType {
    /// Classify an uploaded file by its MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("video/") {
            Some(MediaType::Video)
        } else if mime.starts_with("image/") {
            Some(MediaType::Image)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert_eq!(err, SharedError::invalid_value("role", "admin"));
    }

    #[test]
    fn test_recruiting_roles() {
        assert!(Role::JobSeeker.is_recruiting());
        assert!(Role::Employer.is_recruiting());
        assert!(!Role::User.is_recruiting());
        assert!(!Role::Creator.is_recruiting());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&JobType::FullTime).unwrap();
        assert_eq!(json, "\"full_time\"");
        let status: ApplicationStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, ApplicationStatus::Approved);
    }

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("video/mp4"), Some(MediaType::Video));
        assert_eq!(MediaType::from_mime("image/png"), Some(MediaType::Image));
        assert_eq!(MediaType::from_mime("application/pdf"), None);
    }
}
