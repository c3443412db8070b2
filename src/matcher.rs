// Favorite-food matching against scraped dishes
use crate::model::{Dish, DishCollection, MatchError, Menu};

/// Lower-cased search terms. Matching is substring containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, dish: &str) -> bool {
        let dish = dish.to_lowercase();
        self.0.iter().any(|keyword| dish.contains(keyword.as_str()))
    }
}

impl From<&str> for Keywords {
    fn from(keyword: &str) -> Self {
        Keywords::new([keyword])
    }
}

/// Narrows `dishes` to those containing any keyword.
///
/// Returns `Ok(None)` when nothing matched and `NoDishesAvailable` when there
/// is nothing to search in.
pub fn find_matches(
    keywords: &Keywords,
    dishes: Option<&DishCollection>,
) -> Result<Option<DishCollection>, MatchError> {
    let dishes = dishes.ok_or(MatchError::NoDishesAvailable)?;

    let matched = match dishes {
        DishCollection::Single(dish) => {
            match_flat(keywords, std::slice::from_ref(dish)).map(DishCollection::Flat)
        }
        DishCollection::Flat(list) => match_flat(keywords, list).map(DishCollection::Flat),
        DishCollection::Grouped(menu) => match_grouped(keywords, menu).map(DishCollection::Grouped),
    };

    Ok(matched)
}

pub fn match_flat(keywords: &Keywords, dishes: &[Dish]) -> Option<Vec<Dish>> {
    let matched: Vec<Dish> = dishes
        .iter()
        .filter(|dish| keywords.matches(dish))
        .cloned()
        .collect();

    if matched.is_empty() { None } else { Some(matched) }
}

pub fn match_grouped(keywords: &Keywords, menu: &Menu) -> Option<Menu> {
    let matched: Menu = menu
        .iter()
        .filter_map(|(category, dishes)| {
            match_flat(keywords, dishes).map(|found| (category, found))
        })
        .collect();

    if matched.is_empty() { None } else { Some(matched) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> DishCollection {
        DishCollection::Grouped(
            [("Mittagessen", vec!["• Waffel mit Sahne".to_string(), "• Gulasch".to_string()])]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn matches_grouped_dishes() {
        let result = find_matches(&Keywords::new(["Waffel"]), Some(&lunch())).unwrap();

        let expected: Menu = [("Mittagessen", vec!["• Waffel mit Sahne".to_string()])]
            .into_iter()
            .collect();
        assert_eq!(result, Some(DishCollection::Grouped(expected)));
    }

    #[test]
    fn no_match_is_absent() {
        let dishes = DishCollection::Grouped(
            [("Mittagessen", vec!["• Gulasch".to_string()])].into_iter().collect(),
        );
        assert_eq!(find_matches(&Keywords::new(["xyz"]), Some(&dishes)).unwrap(), None);
    }

    #[test]
    fn empty_categories_are_dropped_and_order_kept() {
        let menu: Menu = [
            ("Frühstück", vec!["• Milchreis".to_string()]),
            ("Mittagessen", vec!["• Gulasch".to_string()]),
            ("Abendessen", vec!["• Kartoffelpuffer".to_string(), "• Milchreis mit Zimt".to_string()]),
        ]
        .into_iter()
        .collect();

        let matched = match_grouped(&Keywords::new(["milchreis", "PUFFER"]), &menu).unwrap();

        let categories: Vec<_> = matched.categories().collect();
        assert_eq!(categories, ["Frühstück", "Abendessen"]);
        assert_eq!(matched.get("Abendessen").unwrap().len(), 2);
    }

    #[test]
    fn flat_matching_is_case_insensitive_substring() {
        let dishes = vec![
            "• Hefeklöße mit Vanillesoße".to_string(),
            "• Gulasch".to_string(),
            "• Germknödel".to_string(),
        ];
        let result = find_matches(&"KLÖßE".into(), Some(&DishCollection::Flat(dishes))).unwrap();
        assert_eq!(
            result,
            Some(DishCollection::Flat(vec!["• Hefeklöße mit Vanillesoße".to_string()]))
        );
    }

    #[test]
    fn single_dish_is_a_one_element_list() {
        let dish = DishCollection::Single("• Kaiserschmarrn".to_string());
        let result = find_matches(&Keywords::from("schmarrn"), Some(&dish)).unwrap();
        assert_eq!(result, Some(DishCollection::Flat(vec!["• Kaiserschmarrn".to_string()])));
    }

    #[test]
    fn missing_dishes_is_a_precondition_failure() {
        let err = find_matches(&Keywords::new(["Waffel"]), None).unwrap_err();
        assert!(matches!(err, MatchError::NoDishesAvailable));
    }

    #[test]
    fn keywords_are_normalized_and_deduplicated() {
        assert_eq!(Keywords::new(["Waffel", "WAFFEL"]), Keywords::new(["waffel"]));
    }
}
