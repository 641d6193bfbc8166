#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Lock discipline for `catalog::CatalogStore`.
//!
//! The store keeps records, settings and recent submissions behind one
//! `tokio::sync::RwLock` field named `state`. Two rules hold for every
//! method on the store:
//!
//! 1. Once a guard from `self.state.read().await` or
//!    `self.state.write().await` is bound to a name, nothing else is awaited
//!    until that guard's block ends (or it is dropped). A suspended task
//!    holding the guard stalls every request.
//! 2. Files under the data directory are only written while a write guard
//!    is held, so concurrent appends reach disk in the order they were
//!    applied in memory.

use std::fs;
use std::path::Path;

use syn::visit::Visit;
use syn::{Block, Expr, ExprAwait, ExprCall, ImplItem, Item, Local, Pat, Stmt};

/// Lock mode of a bound guard
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Read,
    Write,
}

/// `let <name> = self.state.<read|write>().await` → the binding and mode
fn guard_binding(local: &Local) -> Option<(String, Mode)> {
    let name = match &local.pat {
        Pat::Ident(p) => p.ident.to_string(),
        _ => return None,
    };
    let Expr::Await(awaited) = &*local.init.as_ref()?.expr else {
        return None;
    };
    let Expr::MethodCall(call) = &*awaited.base else {
        return None;
    };
    let mode = match call.method.to_string().as_str() {
        "read" => Mode::Read,
        "write" => Mode::Write,
        _ => return None,
    };
    let Expr::Field(field) = &*call.receiver else {
        return None;
    };
    let on_self = matches!(&*field.base, Expr::Path(p) if p.path.is_ident("self"));
    let is_state = matches!(&field.member, syn::Member::Named(m) if m == "state");
    (on_self && is_state).then_some((name, mode))
}

/// `drop(<name>);`
fn dropped_guard(stmt: &Stmt) -> Option<String> {
    let Stmt::Expr(Expr::Call(call), _) = stmt else {
        return None;
    };
    let is_drop = matches!(&*call.func, Expr::Path(p) if p.path.is_ident("drop"));
    match call.args.first() {
        Some(Expr::Path(arg)) if is_drop => arg.path.get_ident().map(|i| i.to_string()),
        _ => None,
    }
}

struct StoreLockVisitor {
    method: String,
    /// Guards bound in each enclosing block, innermost last
    scopes: Vec<Vec<(String, Mode)>>,
    violations: Vec<String>,
}

impl StoreLockVisitor {
    fn new(method: String) -> Self {
        Self {
            method,
            scopes: Vec::new(),
            violations: Vec::new(),
        }
    }

    fn held(&self) -> impl Iterator<Item = &(String, Mode)> {
        self.scopes.iter().flatten()
    }
}

impl<'ast> Visit<'ast> for StoreLockVisitor {
    fn visit_block(&mut self, block: &'ast Block) {
        self.scopes.push(Vec::new());
        for stmt in &block.stmts {
            if let Stmt::Local(local) = stmt {
                if let Some(guard) = guard_binding(local) {
                    if let Some(scope) = self.scopes.last_mut() {
                        scope.push(guard);
                    }
                    continue;
                }
            }
            if let Some(name) = dropped_guard(stmt) {
                for scope in &mut self.scopes {
                    scope.retain(|(held, _)| *held != name);
                }
                continue;
            }
            self.visit_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn visit_expr_await(&mut self, node: &'ast ExprAwait) {
        let held: Vec<String> = self.held().map(|(name, _)| name.clone()).collect();
        if !held.is_empty() {
            self.violations.push(format!(
                "{}: awaits while holding store guard {:?}",
                self.method, held
            ));
        }
        syn::visit::visit_expr_await(self, node);
    }

    fn visit_expr_call(&mut self, node: &'ast ExprCall) {
        let writes_file = matches!(&*node.func, Expr::Path(p) if p.path.is_ident("write_file"));
        if writes_file && !self.held().any(|(_, mode)| *mode == Mode::Write) {
            self.violations.push(format!(
                "{}: writes a data file without holding the write guard",
                self.method
            ));
        }
        syn::visit::visit_expr_call(self, node);
    }

    // Closures and async blocks run later, outside this method's guards
    fn visit_expr_closure(&mut self, _: &'ast syn::ExprClosure) {}
    fn visit_expr_async(&mut self, _: &'ast syn::ExprAsync) {}
}

/// Check every method in `impl CatalogStore` blocks of the given source
fn analyze_store(src: &str) -> Vec<String> {
    let file = syn::parse_file(src).expect("store module should parse");

    let mut violations = Vec::new();
    for item in &file.items {
        let Item::Impl(imp) = item else { continue };
        let is_store = matches!(&*imp.self_ty, syn::Type::Path(t) if t.path.is_ident("CatalogStore"));
        if !is_store {
            continue;
        }
        for impl_item in &imp.items {
            if let ImplItem::Fn(method) = impl_item {
                let mut visitor = StoreLockVisitor::new(method.sig.ident.to_string());
                visitor.visit_block(&method.block);
                violations.extend(visitor.violations);
            }
        }
    }
    violations
}

#[test]
fn detects_await_after_guard_is_bound() {
    let src = r#"
        impl CatalogStore {
            pub async fn slow_append(&self, record: CatalogRecord) {
                let mut state = self.state.write().await;
                state.records.push(record);
                self.flush().await;
            }
        }
    "#;

    let violations = analyze_store(src);
    assert_eq!(violations.len(), 1, "{violations:?}");
    assert!(violations[0].starts_with("slow_append: awaits"));
}

#[test]
fn guard_released_by_block_or_drop_is_fine() {
    let src = r#"
        impl CatalogStore {
            pub async fn scoped(&self) -> usize {
                let n = {
                    let state = self.state.read().await;
                    state.records.len()
                };
                self.other().await;
                n
            }

            pub async fn dropped(&self) {
                let mut state = self.state.write().await;
                state.submissions.clear();
                drop(state);
                self.other().await;
            }

            pub async fn temporary(&self) -> usize {
                self.state.read().await.records.len() + self.len().await
            }
        }
    "#;

    assert!(analyze_store(src).is_empty());
}

#[test]
fn detects_file_write_outside_write_guard() {
    let src = r#"
        impl CatalogStore {
            pub async fn save(&self) -> Result<(), StoreError> {
                let json = {
                    let state = self.state.read().await;
                    to_json(CATALOG_FILE, &state.records)?
                };
                write_file(&self.data_dir, CATALOG_FILE, &json)
            }
        }
    "#;

    let violations = analyze_store(src);
    assert_eq!(
        violations,
        vec!["save: writes a data file without holding the write guard"]
    );
}

#[test]
fn other_types_are_not_checked() {
    let src = r#"
        impl Elsewhere {
            async fn f(&self) { let g = self.state.write().await; self.g().await; }
        }
    "#;
    assert!(analyze_store(src).is_empty());
}

#[test]
fn catalog_store_follows_lock_discipline() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/catalog/store.rs");
    let src = fs::read_to_string(&path).expect("Failed to read src/catalog/store.rs");

    let violations = analyze_store(&src);
    assert!(
        violations.is_empty(),
        "\n\nCatalogStore lock discipline broken:\n  {}\n",
        violations.join("\n  ")
    );
}
