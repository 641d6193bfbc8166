//! Event bus discipline.
//!
//! Server-sent events are the only way other open studio tabs learn about
//! new bots and saved settings, so two rules are enforced on the source:
//!
//! 1. Only `src/bus/` touches the broadcast channel. Everything else goes
//!    through `EventBus::publish`, which logs when nobody is listening.
//! 2. Every catalog handler that changes the store also publishes.

use std::fs;
use std::path::Path;

use syn::visit::Visit;
use syn::{ExprMethodCall, ItemFn};
use walkdir::WalkDir;

/// Store calls that change what other clients would see
const MUTATING_STORE_CALLS: &[&str] = &["append", "update_settings", "record_submission"];

/// Records `.send(..)` and `.publish(..)` calls plus mutating store calls
#[derive(Default)]
struct BusUseVisitor {
    sends: usize,
    publishes: usize,
    mutations: Vec<String>,
}

impl<'ast> Visit<'ast> for BusUseVisitor {
    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        let method = node.method.to_string();
        match method.as_str() {
            "send" => self.sends += 1,
            "publish" => self.publishes += 1,
            m if MUTATING_STORE_CALLS.contains(&m) => self.mutations.push(method.clone()),
            _ => {}
        }
        syn::visit::visit_expr_method_call(self, node);
    }
}

/// Drop `#[cfg(test)]` items before inspecting a file
fn production_items(file: syn::File) -> Vec<syn::Item> {
    file.items
        .into_iter()
        .filter(|item| {
            let attrs = match item {
                syn::Item::Mod(m) => &m.attrs,
                syn::Item::Fn(f) => &f.attrs,
                _ => return true,
            };
            !attrs.iter().any(|a| {
                a.path().is_ident("cfg")
                    && a.parse_args::<syn::Ident>().is_ok_and(|i| i == "test")
            })
        })
        .collect()
}

/// Channel use outside the bus module: `broadcast::` paths or `.send(..)`
fn channel_use_outside_bus(path: &Path, content: &str) -> Vec<String> {
    let Ok(file) = syn::parse_file(content) else {
        return vec![];
    };

    let mut found = Vec::new();
    for item in production_items(file) {
        let mut visitor = BusUseVisitor::default();
        visitor.visit_item(&item);
        if visitor.sends > 0 {
            found.push(format!("{}: calls .send() directly", path.display()));
        }
    }
    if content.contains("broadcast::") {
        found.push(format!("{}: names tokio broadcast types", path.display()));
    }
    found
}

/// Handlers that mutate the store without publishing a bus event
fn silent_mutations(content: &str) -> Vec<String> {
    let file = syn::parse_file(content).expect("handler module should parse");

    production_items(file)
        .iter()
        .filter_map(|item| match item {
            syn::Item::Fn(ItemFn { sig, block, .. }) => {
                let mut visitor = BusUseVisitor::default();
                visitor.visit_block(block);
                (!visitor.mutations.is_empty() && visitor.publishes == 0).then(|| {
                    format!(
                        "{} calls {} without publishing",
                        sig.ident,
                        visitor.mutations.join(", ")
                    )
                })
            }
            _ => None,
        })
        .collect()
}

#[test]
fn detects_handler_that_forgets_to_publish() {
    let src = r#"
        pub async fn quiet(State(state): State<AppState>, Json(r): Json<CatalogRecord>) {
            state.catalog.append(r).await.ok();
        }
        pub async fn loud(State(state): State<AppState>, Json(s): Json<SharedSettings>) {
            state.catalog.update_settings(s).await.ok();
            state.bus.publish(BusEvent::SettingsUpdated { at: Utc::now() });
        }
        pub async fn read_only(State(state): State<AppState>) -> usize {
            state.catalog.len().await
        }
    "#;

    let found = silent_mutations(src);
    assert_eq!(found, vec!["quiet calls append without publishing"]);
}

#[test]
fn detects_direct_send_but_not_in_tests() {
    let src = r#"
        pub fn shout(tx: &Sender<BusEvent>, e: BusEvent) {
            tx.send(e).ok();
        }
        #[cfg(test)]
        mod tests {
            fn helper(tx: &Sender<u8>) { tx.send(1).ok(); }
        }
    "#;

    let found = channel_use_outside_bus(Path::new("src/shout.rs"), src);
    assert_eq!(found, vec!["src/shout.rs: calls .send() directly"]);
}

#[test]
fn only_the_bus_touches_the_channel() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let bus_dir = src_dir.join("bus");

    let mut violations = Vec::new();
    for entry in WalkDir::new(&src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|e| !e.path().starts_with(&bus_dir))
    {
        let content = fs::read_to_string(entry.path()).unwrap_or_default();
        violations.extend(channel_use_outside_bus(entry.path(), &content));
    }

    assert!(
        violations.is_empty(),
        "\n\nPublish through bus::EventBus::publish instead:\n  {}\n",
        violations.join("\n  ")
    );
}

#[test]
fn bus_publish_logs_undelivered_events() {
    let bus = fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("src/bus/mod.rs"))
        .expect("Failed to read src/bus/mod.rs");

    // The single send site must inspect the result instead of discarding it
    assert_eq!(bus.matches(".send(").count(), 1, "expected one send in EventBus::publish");
    assert!(
        bus.contains("if let Err(e) = self.sender.send(event)"),
        "EventBus::publish must log sends with no subscribers"
    );
}

#[test]
fn catalog_mutations_are_announced() {
    let routes =
        fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("src/catalog/routes.rs"))
            .expect("Failed to read src/catalog/routes.rs");

    let found = silent_mutations(&routes);
    assert!(
        found.is_empty(),
        "\n\nOpen studio tabs only refresh on bus events:\n  {}\n",
        found.join("\n  ")
    );
}
