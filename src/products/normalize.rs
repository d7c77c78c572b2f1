//! Pure helpers that merge, filter and order product collections.

use super::model::{Product, ProductCollection, ProductGroup};
use std::collections::HashMap;

/// Plugin GL numbers in order of popularity:
///
/// All plugins + All courses: "80001"
/// All plugins: "82109"
/// Premium WP: "82101"
/// Local WP: "82103"
/// News WP: "82104"
/// WooCommerce: "82105"
/// Video WP: "82102"
/// Local WooCommerce: "82106"
pub const PLUGIN_POPULARITY_ORDER: [&str; 8] = [
    "80001", "82109", "82101", "82103", "82104", "82105", "82102", "82106",
];

/// Site type to plugin product type.
pub const PLUGIN_MAPPING: [(&str, &str); 2] = [("wordpress", "plugin"), ("typo3", "typo3-extension")];

/// Anything that can be folded into a [`ProductGroup`] keyed by GL number.
pub trait GlGrouped {
    fn gl_number(&self) -> &str;
    fn into_group(self) -> ProductGroup;
}

impl GlGrouped for Product {
    fn gl_number(&self) -> &str {
        &self.gl_number
    }

    fn into_group(self) -> ProductGroup {
        ProductGroup::from(self)
    }
}

impl GlGrouped for &Product {
    fn gl_number(&self) -> &str {
        &self.gl_number
    }

    fn into_group(self) -> ProductGroup {
        ProductGroup::from(self.clone())
    }
}

impl GlGrouped for ProductGroup {
    fn gl_number(&self) -> &str {
        &self.gl_number
    }

    fn into_group(self) -> ProductGroup {
        self
    }
}

/// Groups keyed by GL number, in the order each GL number was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductGroups {
    groups: Vec<ProductGroup>,
    index: HashMap<String, usize>,
}

impl ProductGroups {
    pub fn get(&self, gl_number: &str) -> Option<&ProductGroup> {
        self.index.get(gl_number).map(|&i| &self.groups[i])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.gl_number.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The groups without their keys.
    pub fn into_vec(self) -> Vec<ProductGroup> {
        self.groups
    }

    fn insert(&mut self, item: impl GlGrouped) {
        if let Some(&i) = self.index.get(item.gl_number()) {
            let ids = item.into_group().ids;
            self.groups[i].ids.extend(ids);
            return;
        }
        let group = item.into_group();
        self.index.insert(group.gl_number.clone(), self.groups.len());
        self.groups.push(group);
    }
}

impl IntoIterator for ProductGroups {
    type Item = ProductGroup;
    type IntoIter = std::vec::IntoIter<ProductGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Merges entries that share a GL number.
///
/// Every GL number yields exactly one group whose `ids` lists all member ids in
/// first-seen order. Feeding already merged groups back in changes nothing.
pub fn filter_out_duplicates<I>(products: I) -> ProductGroups
where
    I: IntoIterator,
    I::Item: GlGrouped,
{
    let mut groups = ProductGroups::default();
    for item in products {
        groups.insert(item);
    }
    groups
}

/// [`filter_out_duplicates`] without the GL number keys.
pub fn filter_out_duplicates_as_array(collection: &ProductCollection) -> Vec<ProductGroup> {
    filter_out_duplicates(collection).into_vec()
}

/// Keeps the entries of `product_type`, then merges duplicates.
pub fn filter_by_type(product_type: &str, collection: &ProductCollection) -> Vec<ProductGroup> {
    filter_out_duplicates(
        collection
            .into_iter()
            .filter(|p| p.product_type == product_type),
    )
    .into_vec()
}

/// Orders groups by [`PLUGIN_POPULARITY_ORDER`].
///
/// GL numbers missing from the list go last; ties keep their input order.
pub fn sort_by_popularity(mut records: Vec<ProductGroup>) -> Vec<ProductGroup> {
    records.sort_by_key(|r| popularity_rank(&r.gl_number));
    records
}

fn popularity_rank(gl_number: &str) -> usize {
    PLUGIN_POPULARITY_ORDER
        .iter()
        .position(|&gl| gl == gl_number)
        .unwrap_or(usize::MAX)
}

/// Looks `key` up in `mapping` and filters by the mapped type. Unknown keys
/// give an empty result.
pub fn select_by_mapped_category(
    key: &str,
    mapping: &[(&str, &str)],
    collection: &ProductCollection,
) -> Vec<ProductGroup> {
    match mapping.iter().find(|(k, _)| *k == key) {
        Some((_, product_type)) => filter_by_type(product_type, collection),
        None => Vec::new(),
    }
}

/// Plugins for a site type listed in [`PLUGIN_MAPPING`].
pub fn get_plugins_for_site_type(site_type: &str, collection: &ProductCollection) -> Vec<ProductGroup> {
    select_by_mapped_category(site_type, &PLUGIN_MAPPING, collection)
}

pub fn get_ebooks(collection: &ProductCollection) -> Vec<ProductGroup> {
    filter_by_type("ebook", collection)
}

pub fn get_cares(collection: &ProductCollection) -> Vec<ProductGroup> {
    filter_by_type("care", collection)
}

pub fn get_courses(collection: &ProductCollection) -> Vec<ProductGroup> {
    filter_by_type("course", collection)
}
