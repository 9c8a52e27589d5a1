use crate::domain::models::product::NewProduct;

fn product(
    title: &str,
    description: &str,
    price: f64,
    stock: i32,
    sizes: &[&str],
    gender: &str,
    tags: &[&str],
    images: &[&str],
) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        price: Some(price),
        description: Some(description.to_string()),
        slug: None,
        stock: Some(stock),
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        gender: gender.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        images: images.iter().map(|i| i.to_string()).collect(),
    }
}

/// Fixed catalog used by the re-seed workflow.
pub fn seed_catalog() -> Vec<NewProduct> {
    vec![
        product(
            "Chill Crew Neck Sweatshirt",
            "Introducing the softest crew neck in the catalog. Relaxed fit, double-stitched cuffs.",
            75.0,
            7,
            &["XS", "S", "M", "L", "XL", "XXL"],
            "men",
            &["sweatshirt"],
            &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
        ),
        product(
            "Quilted Shirt Jacket",
            "A quilted shirt jacket with a water-resistant shell and snap closures.",
            200.0,
            5,
            &["XS", "S", "M", "XL", "XXL"],
            "men",
            &["jacket"],
            &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
        ),
        product(
            "Raven Lightweight Zip Up Bomber Jacket",
            "Lightweight bomber with a hidden chest pocket and matte finish zips.",
            130.0,
            10,
            &["S", "M", "L", "XL", "XXL"],
            "men",
            &["shirt"],
            &["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"],
        ),
        product(
            "Turbine Long Sleeve Tee",
            "Moisture-wicking long sleeve tee with tonal logo print.",
            45.0,
            50,
            &["XS", "S", "M", "L"],
            "men",
            &["shirt"],
            &["1740280-00-A_0_2000.jpg", "1740280-00-A_1.jpg"],
        ),
        product(
            "Women's Cropped Puffer Jacket",
            "Cropped puffer with recycled fill and a cinched hem.",
            225.0,
            85,
            &["XS", "S", "M"],
            "women",
            &["hoodie"],
            &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
        ),
        product(
            "Women's Chill Half Zip Cropped Hoodie",
            "Cropped half-zip hoodie in soft french terry.",
            130.0,
            10,
            &["XS", "S", "M", "XXL"],
            "women",
            &["hoodie"],
            &["1740226-00-A_0_2000.jpg", "1740226-00-A_1.jpg"],
        ),
        product(
            "Women's Raven Slouchy Crew Sweatshirt",
            "Slouchy crew with dropped shoulders and a brushed interior.",
            110.0,
            9,
            &["XS", "S", "M"],
            "women",
            &["sweatshirt"],
            &["1740260-00-A_0_2000.jpg", "1740260-00-A_1.jpg"],
        ),
        product(
            "Kids Cyberquad Bomber Jacket",
            "Scaled-down bomber jacket with ribbed collar and cuffs.",
            65.0,
            10,
            &["XS", "S", "M"],
            "kid",
            &["shirt"],
            &["1742702-00-A_0_2000.jpg", "1742702-00-A_1.jpg"],
        ),
        product(
            "Kids Corp Jacket",
            "Everyday windbreaker with an adjustable hood.",
            30.0,
            10,
            &["XS", "S", "M"],
            "kid",
            &["shirt"],
            &["1742706-00-A_0_2000.jpg", "1742706-00-A_1.jpg"],
        ),
        product(
            "3D Logo Beanie",
            "Rib-knit beanie with an embroidered 3D logo.",
            30.0,
            13,
            &["One Size"],
            "unisex",
            &["hats"],
            &["1657932-00-A_0_2000.jpg", "1657932-00-A_1.jpg"],
        ),
        product(
            "Relaxed Fit Tee",
            "Relaxed fit tee in heavyweight combed cotton.",
            35.0,
            34,
            &["XS", "S", "M", "L", "XL", "XXL"],
            "unisex",
            &["shirt"],
            &["8764734-00-A_0_2000.jpg", "8764734-00-A_1.jpg"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::product::{normalize_slug, VALID_GENDERS};
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn seed_catalog_entries_are_valid_products() {
        for entry in seed_catalog() {
            entry.validate().unwrap();
            assert!(VALID_GENDERS.contains(&entry.gender.as_str()));
        }
    }

    #[test]
    fn seed_titles_and_slugs_are_unique() {
        let catalog = seed_catalog();
        let titles: HashSet<_> = catalog.iter().map(|p| p.title.clone()).collect();
        let slugs: HashSet<_> = catalog.iter().map(|p| normalize_slug(&p.title)).collect();
        assert_eq!(titles.len(), catalog.len());
        assert_eq!(slugs.len(), catalog.len());
    }
}
