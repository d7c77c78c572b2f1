//! Display records consumed by the download page.

use super::model::{ProductGroup, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One download button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadButton {
    pub label: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub ids: Vec<ProductId>,
    pub gl_number: String,
    pub name: String,
    pub current_version: Option<Value>,
    pub icon: Option<String>,
    pub category: String,
    pub buttons: Vec<DownloadButton>,
}

impl From<&ProductGroup> for DisplayRecord {
    fn from(group: &ProductGroup) -> Self {
        Self {
            ids: group.ids.clone(),
            gl_number: group.gl_number.clone(),
            name: unescape_html(&group.name),
            current_version: group.current_version.clone(),
            icon: group.icon.clone(),
            category: group.product_type.clone(),
            buttons: group
                .downloads
                .iter()
                .map(|d| DownloadButton {
                    label: d.name.clone(),
                    file: d.file.clone(),
                })
                .collect(),
        }
    }
}

pub fn to_display_records<'a, I>(records: I) -> Vec<DisplayRecord>
where
    I: IntoIterator<Item = &'a ProductGroup>,
{
    records.into_iter().map(DisplayRecord::from).collect()
}

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Converts `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&#39;` back to characters.
/// Other entities are left alone. Runs in one pass so `&amp;lt;` becomes `&lt;`.
pub fn unescape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{Download, Product};

    #[test]
    fn builds_buttons_from_downloads() {
        let product = Product::new(1i64, "82101", "plugin", "Yoast SEO Premium").with_downloads(vec![
            Download { name: "Download".into(), file: "https://dl.test/premium.zip".into() },
            Download { name: "Changelog".into(), file: "https://dl.test/changelog.txt".into() },
        ]);
        let records = to_display_records(&[ProductGroup::from(product)]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "plugin");
        assert_eq!(
            records[0].buttons,
            vec![
                DownloadButton { label: "Download".into(), file: "https://dl.test/premium.zip".into() },
                DownloadButton { label: "Changelog".into(), file: "https://dl.test/changelog.txt".into() },
            ]
        );
    }

    #[test]
    fn no_downloads_means_no_buttons() {
        let group = ProductGroup::from(Product::new(2i64, "80002", "course", "Course"));
        let record = DisplayRecord::from(&group);
        assert!(record.buttons.is_empty());
    }

    #[test]
    fn unescapes_product_names() {
        let group = ProductGroup::from(Product::new(3i64, "82105", "plugin", "Yoast &amp; WooCommerce &#39;SEO&#39;"));
        assert_eq!(DisplayRecord::from(&group).name, "Yoast & WooCommerce 'SEO'");
    }

    #[test]
    fn unescape_is_single_pass() {
        assert_eq!(unescape_html("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
        assert_eq!(unescape_html("Tom &amp Jerry &copy;"), "Tom &amp Jerry &copy;");
        assert_eq!(unescape_html("&lt;&gt;&quot;"), "<>\"");
    }

    #[test]
    fn empty_input_gives_no_records() {
        assert!(to_display_records(&Vec::<ProductGroup>::new()).is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let group = ProductGroup::from(Product::new(4i64, "82109", "plugin", "All plugins"));
        let value = serde_json::to_value(DisplayRecord::from(&group)).unwrap();
        assert_eq!(value["glNumber"], "82109");
        assert_eq!(value["category"], "plugin");
        assert_eq!(value["buttons"], serde_json::json!([]));
    }
}
