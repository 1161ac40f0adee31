use super::User;

/// Case-insensitive prefix filter over first name, last name, or the
/// full "first last" name. An empty or whitespace-only term matches all.
pub fn filter_users_by_name<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }

    users
        .iter()
        .filter(|user| {
            let first = user.first_name.to_lowercase();
            let last = user.last_name.to_lowercase();
            let full = format!("{first} {last}");
            full.starts_with(&needle) || first.starts_with(&needle) || last.starts_with(&needle)
        })
        .collect()
}

/// Formatted "about" paragraph shown on the detail view.
pub fn about_description(user: &User) -> String {
    format!(
        "Hi, I'm {} {}. I'm {} years old and currently work as a {} in the {} department at {}. \
         I graduated from the {}. I live in {}, {}, and you can reach me at {} or {}.",
        user.first_name,
        user.last_name,
        user.age,
        user.company.title,
        user.company.department,
        user.company.name,
        user.university,
        user.address.city,
        user.address.state,
        user.email,
        user.phone
    )
}
