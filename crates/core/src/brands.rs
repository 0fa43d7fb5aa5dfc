//! Brand name to WatchCharts brand code lookup.

/// Brand names (lower snake_case) and the numeric codes WatchCharts uses for them.
pub static BRAND_CODES: &[(&str, &str)] = &[
    ("rolex", "24"),
    ("patek_philippe", "219"),
    ("audemars_piguet", "50"),
    ("vacheron_constantin", "220"),
    ("hublot", "259"),
    ("omega", "12"),
    ("tag_heuer", "34"),
    ("seiko", "3"),
    ("cartier", "52"),
];

/// Resolves a brand name to its provider code.
///
/// `None` in means "market index"; an unknown name also yields `None` and it is
/// up to the caller to decide what that means.
pub fn resolve(brand: Option<&str>) -> Option<&'static str> {
    let brand = brand?;
    BRAND_CODES
        .iter()
        .find(|(name, _)| *name == brand)
        .map(|(_, code)| *code)
}

pub fn brand_names() -> impl Iterator<Item = &'static str> {
    BRAND_CODES.iter().map(|(name, _)| *name)
}

pub fn catalog() -> &'static [(&'static str, &'static str)] {
    BRAND_CODES
}
