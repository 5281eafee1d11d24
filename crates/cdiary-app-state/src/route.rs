use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum AppRoute {
    #[default]
    Landing,
    SignUp,
    SignIn,
    Home,
    Profile,
    CharacterCreate,
    Write,
    Generate {
        job_id: String,
    },
    Result {
        artifact_id: String,
    },
    Regenerate {
        artifact_id: String,
    },
    Share {
        artifact_id: String,
    },
}

impl AppRoute {
    /// Parse a browser pathname. `None` means the path is not ours and the
    /// caller redirects to the landing route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match trimmed {
            "/" => return Some(Self::Landing),
            "/signup" => return Some(Self::SignUp),
            "/signin" => return Some(Self::SignIn),
            "/home" => return Some(Self::Home),
            "/profile" => return Some(Self::Profile),
            "/character-create" => return Some(Self::CharacterCreate),
            "/write" => return Some(Self::Write),
            _ => {}
        }
        if let Some(job_id) = param_segment(trimmed, "/generate/") {
            return Some(Self::Generate { job_id });
        }
        if let Some(artifact_id) = param_segment(trimmed, "/result/") {
            return Some(Self::Result { artifact_id });
        }
        if let Some(artifact_id) = param_segment(trimmed, "/regenerate/") {
            return Some(Self::Regenerate { artifact_id });
        }
        if let Some(artifact_id) = param_segment(trimmed, "/share/") {
            return Some(Self::Share { artifact_id });
        }
        None
    }

    /// Like [`AppRoute::from_path`], with the unmatched-path redirect folded
    /// in.
    #[must_use]
    pub fn from_path_or_landing(path: &str) -> Self {
        Self::from_path(path).unwrap_or_default()
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::Home => "/home".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::CharacterCreate => "/character-create".to_string(),
            Self::Write => "/write".to_string(),
            Self::Generate { job_id } => format!("/generate/{job_id}"),
            Self::Result { artifact_id } => format!("/result/{artifact_id}"),
            Self::Regenerate { artifact_id } => format!("/regenerate/{artifact_id}"),
            Self::Share { artifact_id } => format!("/share/{artifact_id}"),
        }
    }

    /// Whether the route is behind the must-have-a-session gate.
    #[must_use]
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Landing | Self::SignUp | Self::SignIn)
    }
}

fn param_segment(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest.to_string())
}

/// Where a navigation actually lands. Authenticated-ness is re-derived from
/// session presence on every call, never cached.
#[must_use]
pub fn resolve_navigation(requested: AppRoute, has_session: bool) -> AppRoute {
    if requested.requires_session() && !has_session {
        return AppRoute::SignIn;
    }
    if requested == AppRoute::Landing && has_session {
        return AppRoute::Home;
    }
    requested
}

/// Paths the shell intercepts instead of letting the browser navigate.
#[must_use]
pub fn is_shell_route_path(path: &str) -> bool {
    AppRoute::from_path(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Landing,
            AppRoute::SignUp,
            AppRoute::SignIn,
            AppRoute::Home,
            AppRoute::Profile,
            AppRoute::CharacterCreate,
            AppRoute::Write,
            AppRoute::Generate {
                job_id: "job-9".to_string(),
            },
            AppRoute::Result {
                artifact_id: "A1".to_string(),
            },
            AppRoute::Regenerate {
                artifact_id: "A1".to_string(),
            },
            AppRoute::Share {
                artifact_id: "A1".to_string(),
            },
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), Some(route));
        }
    }

    #[test]
    fn unmatched_paths_fall_back_to_landing() {
        assert_eq!(AppRoute::from_path("/nope"), None);
        assert_eq!(AppRoute::from_path("/result/"), None);
        assert_eq!(AppRoute::from_path("/result/a/b"), None);
        assert_eq!(AppRoute::from_path_or_landing("/nope"), AppRoute::Landing);
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(AppRoute::from_path("/home/"), Some(AppRoute::Home));
    }

    #[test]
    fn protected_routes_redirect_without_a_session() {
        assert_eq!(
            resolve_navigation(AppRoute::Write, false),
            AppRoute::SignIn
        );
        assert_eq!(
            resolve_navigation(
                AppRoute::Result {
                    artifact_id: "A1".to_string()
                },
                false
            ),
            AppRoute::SignIn
        );
        assert_eq!(resolve_navigation(AppRoute::SignUp, false), AppRoute::SignUp);
    }

    #[test]
    fn root_redirects_home_when_signed_in() {
        assert_eq!(resolve_navigation(AppRoute::Landing, true), AppRoute::Home);
        assert_eq!(
            resolve_navigation(AppRoute::Landing, false),
            AppRoute::Landing
        );
    }
}
