use super::*;

#[test]
fn test_expr_id_valid() {
    let id = ExprId::new(42);
    assert!(id.is_valid());
    assert_eq!(id.index(), 42);
    assert_eq!(id.to_option(), Some(id));
}

#[test]
fn test_expr_id_invalid() {
    assert!(!ExprId::INVALID.is_valid());
    assert!(!ExprId::default().is_valid());
    assert_eq!(ExprId::INVALID.to_option(), None);
}

#[test]
fn test_expr_id_debug_and_display() {
    assert_eq!(format!("{:?}", ExprId::new(3)), "ExprId(3)");
    assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
    assert_eq!(ExprId::new(3).to_string(), "#3");
}

#[test]
fn test_expr_id_order_follows_allocation() {
    assert!(ExprId::new(1) < ExprId::new(2));
}

#[test]
fn test_expr_range() {
    let range = ExprRange::new(10, 5);
    assert!(!range.is_empty());
    assert_eq!(range.len(), 5);
    assert_eq!(format!("{range:?}"), "ExprRange(10..15)");
    assert!(ExprRange::new(10, 0).is_empty());
}

#[test]
fn test_token_id() {
    assert_eq!(TokenId::new(7).index(), 7);
    assert_eq!(format!("{:?}", TokenId::new(7)), "TokenId(7)");
}
