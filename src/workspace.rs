//! Session-scoped navigation context.
//!
//! A [`Workspace`] is created at sign-in and owns everything derived from
//! the user's permission forest: the route tree, the menu, the tab session
//! and the breadcrumb trail of the current location. Dropping it is the
//! logout teardown; nothing here is global.

use crate::auth::{AuthSession, GuardDecision, guard};
use crate::breadcrumb::{BreadcrumbItem, build_breadcrumbs};
use crate::menu::{MenuItem, build_menu, default_open_keys, search_menu, visible_menu};
use crate::permission::{PermissionNode, PermissionTree};
use crate::router::{
    FlattenedIndex, LazyResolver, ResolveError, RouteNode, TreeError, build_route_tree, find_exact,
    lazy_refs, open_path_chain, validate_tree,
};
use crate::tab::{TabSession, TitleResolver};
use crate::traits::Navigator;
use navdeck_config::Config;
use std::sync::Arc;

/// Guard redirects followed before giving up on a navigation.
const MAX_REDIRECTS: usize = 4;

pub struct Workspace<P, N> {
    config: Config,
    auth: AuthSession,
    tree: PermissionTree,
    /// Built once per tree, next to the routes and the menu.
    index: FlattenedIndex,
    routes: Vec<RouteNode>,
    menu: Vec<MenuItem>,
    tabs: TabSession,
    titles: TitleResolver,
    resolver: Arc<LazyResolver<P>>,
    navigator: N,
    current_path: String,
    breadcrumbs: Vec<BreadcrumbItem>,
}

impl<P, N> Workspace<P, N>
where
    P: Send + Sync + 'static,
    N: Navigator,
{
    /// Build the workspace for a signed-in session and seed the home tab.
    ///
    /// # Errors
    ///
    /// Only when `config.validate_permission_tree` is set and the forest is
    /// malformed.
    pub fn new(
        config: Config,
        auth: AuthSession,
        resolver: Arc<LazyResolver<P>>,
        navigator: N,
    ) -> Result<Self, TreeError> {
        let tree = auth.permissions().clone();
        if config.validate_permission_tree {
            validate_tree(tree.roots())?;
        }

        let titles = TitleResolver::from_config(&config);
        let tabs = TabSession::with_titles(titles.clone(), config.cache_tabs_by_default);
        let current_path = config.home_path.clone();

        let mut workspace = Self {
            config,
            auth,
            tree,
            index: FlattenedIndex::default(),
            routes: Vec::new(),
            menu: Vec::new(),
            tabs,
            titles,
            resolver,
            navigator,
            current_path,
            breadcrumbs: Vec::new(),
        };
        workspace.rebuild();
        Ok(workspace)
    }

    fn rebuild(&mut self) {
        self.index = FlattenedIndex::new(&self.tree);
        self.routes = build_route_tree(self.tree.roots());
        self.menu = build_menu(self.tree.roots());
        self.resolver.register_refs(lazy_refs(&self.routes));
        self.refresh_breadcrumbs();
        log::debug!(
            "Rebuilt {} routes from {} permission nodes",
            self.routes.iter().map(RouteNode::subtree_len).sum::<usize>(),
            self.tree.node_count()
        );
    }

    fn refresh_breadcrumbs(&mut self) {
        self.breadcrumbs = build_breadcrumbs(&self.index, &self.titles, &self.current_path);
    }

    /// Swap in a new permission forest.
    ///
    /// Derived structures are rebuilt only when `tree` is a different
    /// allocation from the current one. Returns whether a rebuild happened.
    ///
    /// # Errors
    ///
    /// Only when eager validation is enabled and `tree` is malformed; the
    /// current forest is kept in that case.
    pub fn replace_permissions(&mut self, tree: PermissionTree) -> Result<bool, TreeError> {
        if self.tree.same_as(&tree) {
            return Ok(false);
        }
        if self.config.validate_permission_tree {
            validate_tree(tree.roots())?;
        }
        self.tree = tree;
        self.rebuild();
        Ok(true)
    }

    /// Commit a navigation to `path`.
    ///
    /// The guard runs first and its redirects are followed until a path is
    /// allowed. Only that final path is sent to the navigator, and only when
    /// it differs from `path`; it is committed in the same step, so the
    /// navigator and [`Self::current_path`] never disagree. Allowed paths
    /// outside the white list open or activate their tab.
    ///
    /// Returns the path finally shown. When the redirects do not settle,
    /// nothing is sent or committed and the current path is returned.
    pub fn navigate(&mut self, path: &str) -> String {
        let Some(target) = self.resolve_redirects(path) else {
            log::warn!("Too many redirects while navigating to {}", path);
            return self.current_path.clone();
        };
        if target != path {
            self.navigator.navigate(&target);
        }
        self.commit(&target);
        target
    }

    /// Follow guard redirects from `path` to the first allowed path.
    fn resolve_redirects(&self, path: &str) -> Option<String> {
        let mut target = path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match guard(&self.auth, &self.config, &self.routes, &target) {
                GuardDecision::Allow => return Some(target),
                GuardDecision::Redirect(next) => {
                    log::debug!("Guard redirected {} to {}", target, next);
                    target = next;
                }
            }
        }
        None
    }

    fn commit(&mut self, path: &str) {
        if !self.config.is_white_listed(path) {
            self.tabs.on_navigate(path, &self.routes);
        }
        self.current_path = path.to_string();
        self.refresh_breadcrumbs();
    }

    /// Follow the active tab after a tab operation moved it.
    fn sync_to_active_tab(&mut self) {
        let active = self.tabs.active_key().to_string();
        if active != self.current_path {
            self.current_path = active;
            self.refresh_breadcrumbs();
        }
    }

    pub fn close_tab(&mut self, key: &str) {
        self.tabs.remove_tab(key, &mut self.navigator);
        self.sync_to_active_tab();
    }

    pub fn close_other_tabs(&mut self, key: &str) {
        self.tabs.remove_others(key, &mut self.navigator);
        self.sync_to_active_tab();
    }

    pub fn close_all_tabs(&mut self) {
        self.tabs.remove_all(&mut self.navigator);
        self.sync_to_active_tab();
    }

    pub fn activate_tab(&mut self, key: &str) {
        self.tabs.set_active_tab(key, &mut self.navigator);
        self.sync_to_active_tab();
    }

    pub fn move_tab(&mut self, key: &str, index: usize) -> bool {
        self.tabs.move_tab_to_index(key, index)
    }

    /// Resolve the page for the current path, if a route with a page
    /// matches it exactly.
    pub async fn current_page(&self) -> Option<Result<Arc<P>, ResolveError>> {
        let lazy = find_exact(&self.routes, &self.current_path)?.lazy_ref()?.clone();
        Some(self.resolver.resolve(&lazy).await)
    }

    /// Sign out and hand back the cleared session. The navigator is sent
    /// to the login page and the workspace is torn down.
    pub fn logout(mut self) -> AuthSession {
        self.auth.sign_out();
        let login = self.config.login_path.clone();
        self.navigator.navigate(&login);
        std::mem::take(&mut self.auth)
    }

    pub fn open_path_chain(&self) -> Vec<&PermissionNode> {
        open_path_chain(&self.index, &self.current_path)
    }

    /// Pre-order index over the current permission forest.
    pub fn flattened(&self) -> &FlattenedIndex {
        &self.index
    }

    /// Visible menu entries whose label contains `query`, case-insensitively.
    pub fn search_menu(&self, query: &str) -> Vec<MenuItem> {
        search_menu(&self.index, query)
    }

    /// Menu with hidden entries removed.
    pub fn visible_menu(&self) -> Vec<MenuItem> {
        visible_menu(&self.menu)
    }

    pub fn open_menu_keys(&self) -> Vec<String> {
        default_open_keys(&self.current_path)
    }

    pub fn routes(&self) -> &[RouteNode] {
        &self.routes
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn permissions(&self) -> &PermissionTree {
        &self.tree
    }

    pub fn tabs(&self) -> &TabSession {
        &self.tabs
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbItem] {
        &self.breadcrumbs
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<LazyResolver<P>> {
        &self.resolver
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }
}

impl<P, N> Drop for Workspace<P, N> {
    fn drop(&mut self) {
        log::info!(
            "Workspace torn down ({} tabs open)",
            self.tabs.tab_count()
        );
    }
}
