// notifier/format.rs

use crate::model::{Dish, DishCollection, Menu};

/// Renders dish data into one notification text.
///
/// `None` means there is nothing to deliver and the caller should not send.
pub fn format_message(
    payload: &DishCollection,
    location: Option<&str>,
    site: Option<&str>,
) -> Option<String> {
    let message = match payload {
        DishCollection::Single(dish) => format_list(std::slice::from_ref(dish), location, site),
        DishCollection::Flat(dishes) => format_list(dishes, location, site),
        DishCollection::Grouped(menu) => format_menu(menu, location, site),
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

fn format_list(dishes: &[Dish], location: Option<&str>, site: Option<&str>) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(dishes.len() + 2);
    lines.extend(location);
    lines.extend(dishes.iter().map(String::as_str));
    lines.extend(site);
    lines.join("\n")
}

fn format_menu(menu: &Menu, location: Option<&str>, site: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (category, dishes) in menu.iter() {
        let header = match location {
            Some(location) => format!("\n{} - {}", category.to_uppercase(), location),
            None => format!("\n{}", category.to_uppercase()),
        };
        parts.push(header);
        parts.extend(dishes.iter().cloned());
    }

    parts.extend(site.map(str::to_string));
    parts.join("\n")
}
