const COMMANDS: &[&str] = &["get_available_products", "get_purchases", "purchase_item", "restore_item"];

fn main() {
  tauri_plugin::Builder::new(COMMANDS)
    .android_path("android")
    .ios_path("ios")
    .build();
}
