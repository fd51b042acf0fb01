use crate::{
    hooks::{State, UseState},
    ComponentUpdater, ElementRef, HeightCalculator, HeightOptions, Hook, Hooks, ResizeSubscription,
};
use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;
use tracing::warn;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Hooks<'_> {}
}

/// `UseHeightCalculator` is a hook that stretches an element to fill the viewport height left
/// over by its siblings.
///
/// After each update in which the target, the sibling ids, or the options changed, the hook
/// measures the page, writes the height to the target and starts following the viewport's resize
/// signal. The previous resize listener is always removed first, and the last one is removed
/// when the component is unmounted. See [`HeightCalculator`] for how missing elements are
/// handled.
///
/// The returned height starts out as `options.min_height` and catches up once the first
/// measurement has been made.
///
/// # Example
///
/// ```
/// # use viewfill::prelude::*;
/// # use std::sync::Arc;
/// let host = Arc::new(MockHost::new(900));
/// host.insert_element("main-header", 100);
/// host.insert_element("page-main-tabs", 60);
/// let container = host.create_element(0);
///
/// let mut mount = Mount::new(host.clone(), move |hooks: &mut Hooks, _: &()| {
///     let target = hooks.use_element_ref();
///     target.attach(container);
///     hooks.use_height_calculator(
///         &target,
///         ["main-header", "page-main-tabs"],
///         HeightOptions {
///             min_height: 635,
///             offset: 28,
///         },
///     )
/// });
///
/// assert_eq!(mount.settle(&()), 712);
/// assert_eq!(host.style_height(container).as_deref(), Some("712px"));
/// ```
pub trait UseHeightCalculator: private::Sealed {
    /// Returns the derived height of the target, keeping its height style in sync.
    fn use_height_calculator<I, S>(
        &mut self,
        target: &ElementRef,
        sibling_ids: I,
        options: HeightOptions,
    ) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;
}

fn hash_deps<D: Hash>(deps: D) -> u64 {
    let mut hasher = DefaultHasher::new();
    deps.hash(&mut hasher);
    hasher.finish()
}

impl UseHeightCalculator for Hooks<'_> {
    fn use_height_calculator<I, S>(
        &mut self,
        target: &ElementRef,
        sibling_ids: I,
        options: HeightOptions,
    ) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = self.use_state(|| options.min_height);
        let calculator = HeightCalculator::new(target.clone(), sibling_ids).with_options(options);
        let deps_hash = hash_deps(&calculator);
        let hook = self.use_hook(move || UseHeightCalculatorImpl {
            height,
            deps_hash: None,
            pending: None,
            subscription: None,
        });
        if hook.deps_hash != Some(deps_hash) {
            hook.deps_hash = Some(deps_hash);
            hook.pending = Some(calculator);
        }
        height.get()
    }
}

struct UseHeightCalculatorImpl {
    height: State<i32>,
    deps_hash: Option<u64>,
    pending: Option<HeightCalculator>,
    subscription: Option<ResizeSubscription>,
}

impl Hook for UseHeightCalculatorImpl {
    fn post_component_update(&mut self, updater: &mut ComponentUpdater) {
        let Some(calculator) = self.pending.take() else {
            return;
        };

        // The old listener must be gone before the new one exists.
        self.subscription = None;

        let host = updater.host();
        let height = self.height;
        height.set(calculator.recompute(host.as_ref()));
        match calculator.subscribe(host, move |value| height.set(value)) {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(err) => warn!(%err, "height will not follow viewport resizes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use macro_rules_attribute::apply;
    use smol_macros::test;
    use std::sync::Arc;

    #[derive(Clone)]
    struct Props {
        target: ElementRef,
        sibling_ids: Vec<&'static str>,
        options: HeightOptions,
    }

    struct Page {
        host: Arc<MockHost>,
        container: NodeId,
        props: Props,
    }

    fn page() -> Page {
        let host = Arc::new(MockHost::new(900));
        host.insert_element("a", 100);
        host.insert_element("b", 60);
        let container = host.create_element(0);
        let target = ElementRef::new();
        target.attach(container);
        Page {
            host,
            container,
            props: Props {
                target,
                sibling_ids: vec!["a", "b"],
                options: HeightOptions {
                    min_height: 635,
                    offset: 28,
                },
            },
        }
    }

    fn mount(host: &Arc<MockHost>) -> Mount<Props, i32> {
        Mount::new(host.clone(), |hooks: &mut Hooks, props: &Props| {
            hooks.use_height_calculator(
                &props.target,
                props.sibling_ids.iter().copied(),
                props.options,
            )
        })
    }

    #[test]
    fn test_initial_height() {
        let page = page();
        let mut mount = mount(&page.host);

        assert_eq!(mount.update(&page.props), 635);
        assert_eq!(
            page.host.style_height(page.container).as_deref(),
            Some("712px")
        );
        assert!(mount.has_pending_change());
        assert_eq!(mount.update(&page.props), 712);
        assert_eq!(page.host.listener_count(), 1);
    }

    #[test]
    fn test_resize_clamps_to_min_height() {
        let page = page();
        let mut mount = mount(&page.host);
        assert_eq!(mount.settle(&page.props), 712);

        page.host.resize(700);
        assert_eq!(
            page.host.style_height(page.container).as_deref(),
            Some("635px")
        );
        assert_eq!(mount.settle(&page.props), 635);
    }

    #[test]
    fn test_missing_sibling() {
        let page = page();
        page.host.remove_element_by_id("b");
        let mut mount = mount(&page.host);

        assert_eq!(mount.settle(&page.props), 772);
        assert_eq!(
            page.host.style_height(page.container).as_deref(),
            Some("772px")
        );
    }

    #[test]
    fn test_detached_target() {
        let page = page();
        page.props.target.detach();
        let mut mount = mount(&page.host);

        assert_eq!(mount.settle(&page.props), 712);
        assert_eq!(page.host.style_height(page.container), None);
        assert_eq!(page.host.style_writes(), 0);

        page.host.resize(1000);
        assert_eq!(mount.settle(&page.props), 812);
        assert_eq!(page.host.style_writes(), 0);
    }

    #[test]
    fn test_unchanged_props_do_not_resubscribe() {
        let page = page();
        let mut mount = mount(&page.host);
        mount.settle(&page.props);
        let writes = page.host.style_writes();

        mount.update(&page.props);
        mount.update(&page.props.clone());
        assert_eq!(page.host.style_writes(), writes);
        assert_eq!(page.host.listener_count(), 1);

        // attaching a different element to the same handle is not a change
        let other = page.host.create_element(0);
        page.props.target.attach(other);
        mount.update(&page.props);
        assert_eq!(page.host.style_writes(), writes);
    }

    #[test]
    fn test_changed_props_replace_listener() {
        let page = page();
        let mut mount = mount(&page.host);
        mount.settle(&page.props);
        assert_eq!(page.host.style_writes(), 1);

        let props = Props {
            options: HeightOptions {
                min_height: 0,
                offset: 40,
            },
            ..page.props.clone()
        };
        assert_eq!(mount.settle(&props), 700);
        assert_eq!(page.host.listener_count(), 1);
        assert_eq!(page.host.style_writes(), 2);

        for viewport in [1000, 950, 900] {
            page.host.resize(viewport);
        }
        assert_eq!(page.host.style_writes(), 5);
        assert_eq!(mount.settle(&props), 700);

        let props = Props {
            sibling_ids: vec!["a"],
            ..props
        };
        assert_eq!(mount.settle(&props), 760);

        let target = ElementRef::new();
        target.attach(page.container);
        let props = Props { target, ..props };
        mount.settle(&props);
        assert_eq!(page.host.listener_count(), 1);
        assert_eq!(page.host.style_writes(), 7);
    }

    #[test]
    fn test_unmount_removes_listener() {
        let page = page();
        let mut mount = mount(&page.host);
        mount.settle(&page.props);
        let writes = page.host.style_writes();

        mount.unmount();
        assert_eq!(page.host.listener_count(), 0);

        page.host.resize(700);
        assert_eq!(page.host.style_writes(), writes);
        assert_eq!(
            page.host.style_height(page.container).as_deref(),
            Some("712px")
        );
    }

    #[test]
    fn test_rejected_listener_keeps_height() {
        let page = page();
        page.host.reject_listeners(true);
        let mut mount = mount(&page.host);

        assert_eq!(mount.settle(&page.props), 712);
        assert_eq!(page.host.listener_count(), 0);

        page.host.resize(1000);
        assert!(!mount.has_pending_change());
        assert_eq!(mount.update(&page.props), 712);
    }

    #[apply(test!)]
    async fn test_resize_wakes_component() {
        let page = page();
        let mut mount = mount(&page.host);
        assert_eq!(mount.settle(&page.props), 712);

        page.host.resize(1000);
        mount.wait().await;
        assert_eq!(mount.update(&page.props), 812);
    }
}
