//! Snapshot tests for lumina-core using insta
//!
//! These tests capture the JSON shape of reader and storefront output to
//! detect unintended changes in what clients receive.

use lumina_core::reader::{paginate, parse, SpreadNavigator};
use lumina_core::store::MemoryStore;
use lumina_core::storefront::{Catalog, Storefront};
use lumina_core::types::PaymentMethod;
use std::sync::Arc;

#[test]
fn snapshot_illustrated_pages() {
    let pages = paginate(&parse("Hello [IMAGE:a.png] world"), 650).unwrap();
    insta::assert_json_snapshot!(pages, @r###"
    [
      [
        {
          "type": "text_run",
          "text": "Hello "
        }
      ],
      [
        {
          "type": "image_ref",
          "src": "a.png"
        }
      ],
      [
        {
          "type": "text_run",
          "text": " world"
        }
      ],
      []
    ]
    "###);
}

#[test]
fn snapshot_forward_turn_roles() {
    let mut nav = SpreadNavigator::open(6);
    nav.request_next();
    insta::assert_json_snapshot!(nav.roles(), @r###"
    {
      "static_left": 0,
      "static_right": 3,
      "turning": {
        "direction": "forward",
        "front": 1,
        "back": 2
      }
    }
    "###);
}

#[test]
fn snapshot_backward_turn_state() {
    let mut nav = SpreadNavigator::open(6);
    nav.request_next();
    nav.complete_transition();
    nav.request_prev();
    insta::assert_json_snapshot!(nav.state(), @r###"
    {
      "current_left": 2,
      "transition": {
        "target_left": 0,
        "direction": "backward"
      }
    }
    "###);
}

#[tokio::test]
async fn snapshot_card_receipt() {
    let shop = Storefront::new(Arc::new(MemoryStore::new()), Arc::new(Catalog::builtin()));
    let receipt = shop
        .purchase("lumina", "pub-2", PaymentMethod::Card)
        .await
        .unwrap();
    insta::assert_json_snapshot!(receipt, @r###"
    {
      "book_id": "pub-2",
      "method": "card",
      "charged": "$9.99",
      "points_delta": 100,
      "balance": 350,
      "already_owned": false
    }
    "###);
}
