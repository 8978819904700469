// Unit tests for fingerprint extraction

use super::*;
use pretty_assertions::assert_eq;

const LIST_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<body>
    <div id="app" class="shell dark">
        <ul class="menu">
            <li>Home</li>
            <li>Products</li>
            <li>Contact</li>
        </ul>
        <section>
            <button class="buy">Buy now</button>
            <button class="buy">Buy now</button>
            <button class="buy">Buy now</button>
            <button class="checkout">Checkout</button>
        </section>
    </div>
</body>
</html>
"#;

#[test]
fn test_sibling_position_among_same_tag() {
    let fp = extract(LIST_PAGE, "li", 1).unwrap();
    assert_eq!(fp.tag, "li");
    assert_eq!(fp.text, "Products");
    assert_eq!(fp.position.index, 2);
    assert_eq!(fp.position.total, 3);
}

#[test]
fn test_mixed_siblings_count_only_same_tag() {
    // The checkout button is the 4th button even though it differs by class
    let fp = extract(LIST_PAGE, "button.checkout", 0).unwrap();
    assert_eq!(fp.position.index, 4);
    assert_eq!(fp.position.total, 4);
}

#[test]
fn test_duplicate_text_count_and_rank() {
    // Three buttons share tag and exact text; rank must track document order
    for (index, expected_rank) in [(0, 1), (1, 2), (2, 3)] {
        let fp = extract(LIST_PAGE, "button.buy", index).unwrap();
        assert_eq!(fp.duplicates.count, 3, "index {}", index);
        assert_eq!(fp.duplicates.rank, expected_rank, "index {}", index);
        assert!(fp.duplicates.rank >= 1 && fp.duplicates.rank <= fp.duplicates.count);
    }
}

#[test]
fn test_unique_text_is_one_of_one() {
    let fp = extract(LIST_PAGE, "button.checkout", 0).unwrap();
    assert_eq!(fp.duplicates.count, 1);
    assert_eq!(fp.duplicates.rank, 1);
}

#[test]
fn test_empty_text_defaults_to_one_of_one() {
    let html = "<html><body><img src='a.png'><img src='a.png'></body></html>";
    let fp = extract(html, "img", 0).unwrap();
    assert_eq!(fp.duplicates.count, 1);
    assert_eq!(fp.duplicates.rank, 1);
}

#[test]
fn test_ancestor_chain_is_bounded_and_nearest_first() {
    let html = r#"
    <html><body>
        <div id="l1"><div id="l2"><div id="l3"><div id="l4"><div id="l5">
            <div id="l6"><span>deep</span></div>
        </div></div></div></div></div>
    </body></html>
    "#;
    let fp = extract(html, "span", 0).unwrap();
    assert_eq!(fp.ancestors.len(), MAX_ANCESTORS);
    assert_eq!(fp.ancestors[0].id, Some("l6".to_string()));
    assert_eq!(fp.ancestors[4].id, Some("l2".to_string()));
}

#[test]
fn test_ancestor_ids_and_classes() {
    let fp = extract(LIST_PAGE, "li", 0).unwrap();
    let shell = fp
        .ancestors
        .iter()
        .find(|a| a.id.as_deref() == Some("app"))
        .unwrap();
    assert_eq!(shell.tag, "div");
    assert_eq!(shell.classes, vec!["shell".to_string(), "dark".to_string()]);
}

#[test]
fn test_attributes_captured() {
    let html = r#"<html><body><input type="email" name="user" required></body></html>"#;
    let fp = extract(html, "input", 0).unwrap();
    assert_eq!(fp.attributes.get("type"), Some(&"email".to_string()));
    assert_eq!(fp.attributes.get("name"), Some(&"user".to_string()));
    assert!(fp.attributes.contains_key("required"));
}

#[test]
fn test_text_truncation_at_budget() {
    let long_text = "a".repeat(TEXT_BUDGET + 40);
    let html = format!("<html><body><p>{}</p></body></html>", long_text);
    let fp = extract(&html, "p", 0).unwrap();
    assert_eq!(fp.text.chars().count(), TEXT_BUDGET);
    assert!(fp.text_truncated);
}

#[test]
fn test_root_element_is_one_of_one() {
    let fp = extract("<html><body>x</body></html>", "html", 0).unwrap();
    assert_eq!(fp.position, crate::types::SiblingPosition::only());
}

#[test]
fn test_target_not_found() {
    let err = extract(LIST_PAGE, "table", 0).unwrap_err();
    assert!(err.to_string().contains("No element found matching target"));
}

#[test]
fn test_index_out_of_range() {
    assert!(extract(LIST_PAGE, "li", 10).is_err());
}

#[test]
fn test_invalid_target_selector() {
    let err = extract(LIST_PAGE, "li[unclosed", 0).unwrap_err();
    assert!(err.to_string().contains("Invalid target selector"));
}
