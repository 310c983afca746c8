//! Navigation bar: scrolled state, mobile menu and in-page anchors.

use crate::{
    bus::{EventKind, Propagation, Route, Target},
    dom::NodeId,
    page::PageCtx,
    scroll::ScrollerProxy,
};

const MENU_CLASS: &str = "mobile-menu";
const MENU_LINKS: [(&str, &str); 5] = [
    ("hero", "Home"),
    ("features", "Features"),
    ("gallery", "Gallery"),
    ("specs", "Specs"),
    ("contact", "Contact"),
];

fn menu_html() -> String {
    MENU_LINKS
        .iter()
        .map(|(id, label)| format!("<a href=\"#{}\">{}</a>", id, label))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Default)]
pub struct Navigation {
    nav: Option<NodeId>,
    menu: Option<NodeId>,
    scrolled: bool,
}

impl Navigation {
    pub fn init(ctx: &mut PageCtx) -> Self {
        let nav = ctx.dom.query("nav");
        if let Some(nav) = nav {
            for link in ctx.dom.query_within(nav, "a[href^=\"#\"]") {
                ctx.bus
                    .listen(Target::Node(link), EventKind::Click, Route::NavAnchor(link));
            }
        }
        if let Some(button) = ctx.dom.by_id("mobile-menu-btn") {
            ctx.bus
                .listen(Target::Node(button), EventKind::Click, Route::MenuToggle);
        }
        Self {
            nav,
            menu: None,
            scrolled: false,
        }
    }

    /// Sync the `scrolled` class with the adapter's offset.
    pub fn on_scroll(&mut self, ctx: &mut PageCtx) {
        let Some(nav) = self.nav else {
            return;
        };
        let scrolled = ctx.scroll.scroll_top() > ctx.config.nav.scrolled_threshold;
        if scrolled == self.scrolled {
            return;
        }
        self.scrolled = scrolled;
        if scrolled {
            ctx.dom.add_class(nav, "scrolled");
        } else {
            ctx.dom.remove_class(nav, "scrolled");
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu(&self) -> Option<NodeId> {
        self.menu
    }

    /// Open or close the mobile menu, building it on first use.
    pub fn toggle_menu(&mut self, ctx: &mut PageCtx) {
        let Some(nav) = self.nav else {
            return;
        };
        let menu = match self.menu {
            Some(menu) => menu,
            None => {
                let Some(menu) = ctx
                    .dom
                    .create_child(nav, "div", Some(MENU_CLASS), &menu_html())
                else {
                    log::warn!("could not create the mobile menu");
                    return;
                };
                for link in ctx.dom.query_within(menu, "a") {
                    ctx.bus
                        .listen(Target::Node(link), EventKind::Click, Route::MenuLink(link));
                }
                self.menu = Some(menu);
                menu
            }
        };
        ctx.dom.toggle_class(menu, "active");
    }

    pub fn follow_anchor(&mut self, ctx: &mut PageCtx, link: NodeId) -> Propagation {
        scroll_to_href(ctx, link);
        Propagation::PreventDefault
    }

    pub fn follow_menu_link(&mut self, ctx: &mut PageCtx, link: NodeId) -> Propagation {
        if let Some(menu) = self.menu {
            ctx.dom.remove_class(menu, "active");
        }
        scroll_to_href(ctx, link);
        Propagation::PreventDefault
    }
}

fn scroll_to_href(ctx: &mut PageCtx, link: NodeId) {
    let Some(href) = ctx.dom.attr(link, "href") else {
        return;
    };
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        return;
    };
    match ctx.dom.by_id(id) {
        Some(target) => ctx.scroll.scroll_to_node(&mut *ctx.dom, target),
        None => log::debug!("anchor {} has no target", href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_links_every_section() {
        let html = menu_html();
        for (id, label) in MENU_LINKS {
            assert!(html.contains(&format!("href=\"#{}\">{}<", id, label)));
        }
    }
}
