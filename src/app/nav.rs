/// Start-up destination, mirroring the paths the directory uses when
/// navigating internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Directory,
    Details { user_id: String },
    Edit { user_id: String },
}

impl Default for Route {
    fn default() -> Self {
        Route::Directory
    }
}

impl Route {
    /// Parse a path like `/`, `/user/{id}` or `/user/{id}/edit`. Anything
    /// without a usable user id falls back to the directory listing.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Route::Directory;
        }
        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["user", id] if !id.is_empty() => Route::Details {
                user_id: (*id).to_string(),
            },
            ["user", id, "edit"] if !id.is_empty() => Route::Edit {
                user_id: (*id).to_string(),
            },
            _ => Route::Directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Directory);
        assert_eq!(
            Route::parse("/user/u42"),
            Route::Details {
                user_id: "u42".to_string()
            }
        );
        assert_eq!(
            Route::parse("/user/u42/edit"),
            Route::Edit {
                user_id: "u42".to_string()
            }
        );
    }

    #[test]
    fn missing_user_id_redirects_to_the_directory() {
        assert_eq!(Route::parse("/user"), Route::Directory);
        assert_eq!(Route::parse("/user//edit"), Route::Directory);
        assert_eq!(Route::parse("/nonsense/route"), Route::Directory);
    }
}
