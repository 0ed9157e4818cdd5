use crate::models::Role;

/// Outcome of an access-policy evaluation for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(&'static str),
}

pub const SIGNIN_PATH: &str = "/auth/signin";

/// Decides whether a page request may proceed.
///
/// Rules are evaluated in order, first match wins. Framework-internal, API
/// and static paths never reach this function; the middleware filters them
/// before evaluating.
///
/// # Arguments
///
/// * `role` - The caller's role, if one has been assigned to their account.
/// * `has_token` - Whether the caller holds an authenticated session at all.
/// * `path` - The requested path, as seen on the request URI.
///
/// # Returns
///
/// Exactly one `Decision` for every input: either `Allow` or a redirect to
/// the page the caller is confined to.
pub fn decide(role: Option<Role>, has_token: bool, path: &str) -> Decision {
    // No session: everything except the sign-in page goes to sign-in.
    if !has_token && path != SIGNIN_PATH {
        return Decision::RedirectTo(SIGNIN_PATH);
    }

    // The landing page is open to every signed-in caller.
    if path == "/" {
        return Decision::Allow;
    }

    match role {
        // Transitional state: signed in but the role has not been assigned
        // yet. All paths pass until the role document is populated.
        None => Decision::Allow,

        Some(Role::Admin) => Decision::Allow,

        // Trainers are confined to the attendance pages.
        Some(Role::Trainer) => {
            if path.starts_with("/attendance") || path.starts_with("/auth") {
                Decision::Allow
            } else {
                Decision::RedirectTo("/attendance")
            }
        }

        // Administrative assistants are confined to student information.
        Some(Role::AdministrativeAssistant) => {
            if path.starts_with("/studentinformation") || path.starts_with("/auth") {
                Decision::Allow
            } else {
                Decision::RedirectTo("/studentinformation")
            }
        }

        // No restriction defined for the remaining roles.
        Some(Role::Accountant) | Some(Role::Saler) => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: [&str; 5] = [
        "/",
        "/attendance",
        "/studentinformation",
        "/settings",
        "/auth/signin",
    ];

    #[test]
    fn unauthenticated_goes_to_signin_everywhere_but_signin() {
        for path in PATHS {
            let expected = if path == SIGNIN_PATH {
                Decision::Allow
            } else {
                Decision::RedirectTo(SIGNIN_PATH)
            };
            assert_eq!(decide(None, false, path), expected, "path {}", path);
        }
    }

    #[test]
    fn root_is_open_to_any_session() {
        assert_eq!(decide(None, true, "/"), Decision::Allow);
        assert_eq!(decide(Some(Role::Trainer), true, "/"), Decision::Allow);
        assert_eq!(
            decide(Some(Role::AdministrativeAssistant), true, "/"),
            Decision::Allow
        );
    }

    #[test]
    fn missing_role_allows_all_paths() {
        for path in PATHS {
            assert_eq!(decide(None, true, path), Decision::Allow, "path {}", path);
        }
    }

    #[test]
    fn admin_allows_all_paths() {
        for path in PATHS {
            assert_eq!(
                decide(Some(Role::Admin), true, path),
                Decision::Allow,
                "path {}",
                path
            );
        }
    }

    #[test]
    fn trainer_is_confined_to_attendance() {
        assert_eq!(
            decide(Some(Role::Trainer), true, "/attendance"),
            Decision::Allow
        );
        assert_eq!(
            decide(Some(Role::Trainer), true, "/attendance/weekly"),
            Decision::Allow
        );
        assert_eq!(
            decide(Some(Role::Trainer), true, "/settings"),
            Decision::RedirectTo("/attendance")
        );
        assert_eq!(
            decide(Some(Role::Trainer), true, "/studentinformation"),
            Decision::RedirectTo("/attendance")
        );
        assert_eq!(
            decide(Some(Role::Trainer), true, "/auth/signin"),
            Decision::Allow
        );
    }

    #[test]
    fn assistant_is_confined_to_student_information() {
        assert_eq!(
            decide(Some(Role::AdministrativeAssistant), true, "/studentinformation"),
            Decision::Allow
        );
        assert_eq!(
            decide(Some(Role::AdministrativeAssistant), true, "/settings"),
            Decision::RedirectTo("/studentinformation")
        );
        assert_eq!(
            decide(Some(Role::AdministrativeAssistant), true, "/attendance"),
            Decision::RedirectTo("/studentinformation")
        );
        assert_eq!(
            decide(Some(Role::AdministrativeAssistant), true, "/auth/signout"),
            Decision::Allow
        );
    }

    #[test]
    fn unlisted_roles_are_unrestricted() {
        for role in [Role::Accountant, Role::Saler] {
            for path in PATHS {
                assert_eq!(
                    decide(Some(role), true, path),
                    Decision::Allow,
                    "role {:?} path {}",
                    role,
                    path
                );
            }
        }
    }

    // Every (role, token, path) combination must produce a decision; the
    // match above has no fallible arm, so exercising the full grid is enough
    // to pin the table down.
    #[test]
    fn decision_table_is_total() {
        let roles = [
            None,
            Some(Role::Admin),
            Some(Role::Trainer),
            Some(Role::AdministrativeAssistant),
            Some(Role::Accountant),
            Some(Role::Saler),
        ];
        for role in roles {
            for has_token in [false, true] {
                for path in PATHS {
                    let _ = decide(role, has_token, path);
                }
            }
        }
    }
}
