use crate::domain::model::{Platform, PortfolioItem};
use crate::domain::ports::PortfolioSource;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, item: &PortfolioItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => item.category == *name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "All" => CategoryFilter::All,
            other => CategoryFilter::Named(other.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub fn matches(&self, item: &PortfolioItem) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(platform) => item.platform == *platform,
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(PlatformFilter::All),
            other => other.parse().map(PlatformFilter::Only),
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => f.write_str("all"),
            PlatformFilter::Only(platform) => write!(f, "{}", platform),
        }
    }
}

/// Items matching both filters, in their original order.
pub fn filter(
    items: &[PortfolioItem],
    category: &CategoryFilter,
    platform: PlatformFilter,
) -> Vec<PortfolioItem> {
    items
        .iter()
        .filter(|item| category.matches(item) && platform.matches(item))
        .cloned()
        .collect()
}

/// "All" followed by each distinct category in first-seen order.
pub fn categories(items: &[PortfolioItem]) -> Vec<String> {
    let mut out = vec!["All".to_string()];
    for item in items {
        if !item.category.is_empty() && !out.contains(&item.category) {
            out.push(item.category.clone());
        }
    }
    out
}

pub fn featured(items: &[PortfolioItem]) -> Vec<PortfolioItem> {
    items.iter().filter(|item| item.featured).cloned().collect()
}

/// Working set for the portfolio page: the live feed when it answers, else the bundled catalog.
pub async fn load_items(source: Option<&dyn PortfolioSource>) -> Vec<PortfolioItem> {
    let Some(source) = source else {
        return catalog();
    };

    match source.fetch().await {
        Ok(items) => {
            tracing::info!("📡 Loaded {} portfolio items from social feeds", items.len());
            items
        }
        Err(e) => {
            tracing::warn!("Social feed unavailable, using bundled portfolio: {}", e);
            catalog()
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: u32,
    title: &str,
    description: &str,
    photo: u32,
    category: &str,
    platform: Platform,
    featured: bool,
    date: &str,
) -> PortfolioItem {
    let link = match platform {
        Platform::YouTube => "https://youtube.com/",
        Platform::Instagram => "https://www.instagram.com/suparnakhanna05/?hl=en",
    };
    PortfolioItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: format!(
            "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2"
        ),
        category: category.to_string(),
        platform,
        link: link.to_string(),
        featured,
        date: date.to_string(),
    }
}

/// The bundled gallery shown when no feed is configured or reachable.
#[rustfmt::skip]
pub fn catalog() -> Vec<PortfolioItem> {
    use Platform::{Instagram, YouTube};
    vec![
        item(1, "Summer Travel Series", "Exploring hidden gems in Europe with authentic local experiences", 4339954, "Travel", YouTube, true, "June 15, 2024"),
        item(2, "Beauty Tutorials", "Easy-to-follow beauty routines and product reviews", 3062541, "Beauty", Instagram, true, "May 22, 2024"),
        item(3, "Day in My Life", "Follow along for my daily routines, productivity tips, and lifestyle hacks", 3062542, "Lifestyle", YouTube, true, "April 10, 2024"),
        item(4, "Fashion Lookbook", "Seasonal fashion trends and outfit inspirations", 1036623, "Fashion", Instagram, false, "March 5, 2024"),
        item(5, "Healthy Recipes", "Quick and nutritious meal prep ideas for busy people", 1640770, "Food", YouTube, false, "February 18, 2024"),
        item(6, "Home Decor Ideas", "Budget-friendly home styling tips and DIY projects", 1571463, "Lifestyle", Instagram, false, "January 30, 2024"),
        item(7, "Fitness Challenge", "30-day workout program with daily exercise routines", 2294361, "Fitness", YouTube, false, "December 12, 2023"),
        item(8, "Travel Photography", "Capturing breathtaking landscapes and cultural moments", 2387873, "Travel", Instagram, false, "November 8, 2023"),
        item(9, "Tech Reviews", "Honest reviews of the latest gadgets and tech products", 3183150, "Technology", YouTube, false, "October 25, 2023"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, SiteError};
    use async_trait::async_trait;

    struct StaticSource(Vec<PortfolioItem>);

    #[async_trait]
    impl PortfolioSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<PortfolioItem>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl PortfolioSource for BrokenSource {
        async fn fetch(&self) -> Result<Vec<PortfolioItem>> {
            Err(SiteError::feed("youtube", "quota exceeded"))
        }
    }

    fn ids(items: &[PortfolioItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_all_all_is_identity() {
        let items = catalog();
        assert_eq!(filter(&items, &CategoryFilter::All, PlatformFilter::All), items);
        assert!(filter(&[], &CategoryFilter::All, PlatformFilter::All).is_empty());
    }

    #[test]
    fn test_filter_by_category_and_platform() {
        let items = catalog();
        let travel = CategoryFilter::Named("Travel".to_string());

        assert_eq!(ids(&filter(&items, &travel, PlatformFilter::All)), vec!["1", "8"]);
        assert_eq!(
            ids(&filter(&items, &travel, PlatformFilter::Only(Platform::Instagram))),
            vec!["8"]
        );
        assert_eq!(
            ids(&filter(&items, &CategoryFilter::All, PlatformFilter::Only(Platform::YouTube))),
            vec!["1", "3", "5", "7", "9"]
        );
        assert!(filter(&items, &CategoryFilter::Named("Gaming".into()), PlatformFilter::All).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_order_independent() {
        let items = catalog();
        let lifestyle = CategoryFilter::Named("Lifestyle".to_string());
        let ig = PlatformFilter::Only(Platform::Instagram);

        let once = filter(&items, &lifestyle, ig);
        assert_eq!(filter(&once, &lifestyle, ig), once);

        let category_first = filter(&filter(&items, &lifestyle, PlatformFilter::All), &CategoryFilter::All, ig);
        let platform_first = filter(&filter(&items, &CategoryFilter::All, ig), &lifestyle, PlatformFilter::All);
        assert_eq!(category_first, platform_first);
        assert_eq!(category_first, once);
    }

    #[test]
    fn test_filter_leaves_source_untouched() {
        let items = catalog();
        let before = items.clone();
        let _ = filter(&items, &CategoryFilter::Named("Food".into()), PlatformFilter::All);
        assert_eq!(items, before);
    }

    #[test]
    fn test_filters_parse() {
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Travel".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Named("Travel".to_string()))
        );
        assert_eq!("all".parse::<PlatformFilter>(), Ok(PlatformFilter::All));
        assert_eq!(
            "youtube".parse::<PlatformFilter>(),
            Ok(PlatformFilter::Only(Platform::YouTube))
        );
        assert!("tiktok".parse::<PlatformFilter>().is_err());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(
            categories(&catalog()),
            vec!["All", "Travel", "Beauty", "Lifestyle", "Fashion", "Food", "Fitness", "Technology"]
        );
    }

    #[test]
    fn test_featured() {
        assert_eq!(ids(&featured(&catalog())), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_load_items_prefers_feed() {
        let fed = vec![PortfolioItem {
            id: "yt1".to_string(),
            title: "New video".to_string(),
            description: String::new(),
            image_url: "https://i.ytimg.com/vi/yt1/mqdefault.jpg".to_string(),
            category: String::new(),
            platform: Platform::YouTube,
            link: "https://www.youtube.com/watch?v=yt1".to_string(),
            featured: false,
            date: "2024-06-01T10:00:00Z".to_string(),
        }];
        let source = StaticSource(fed.clone());

        assert_eq!(load_items(Some(&source)).await, fed);
    }

    #[tokio::test]
    async fn test_load_items_falls_back_to_catalog() {
        assert_eq!(load_items(Some(&BrokenSource)).await, catalog());
        assert_eq!(load_items(None).await, catalog());
    }
}
