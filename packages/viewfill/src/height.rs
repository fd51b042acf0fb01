use crate::{ElementRef, Host, HostError, Px, ResizeSubscription};
use std::sync::Arc;
use tracing::trace;

/// Defines the tunable inputs of a [`HeightCalculator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeightOptions {
    /// The smallest height that will ever be derived.
    pub min_height: i32,

    /// Extra space to subtract, e.g. for margins that no sibling element accounts for.
    pub offset: i32,
}

/// Returns the height that fills whatever the siblings leave of the viewport, never less than
/// `options.min_height`.
pub fn derived_height(viewport_height: i32, sibling_height: i32, options: HeightOptions) -> i32 {
    viewport_height
        .saturating_sub(sibling_height)
        .saturating_sub(options.offset)
        .max(options.min_height)
}

/// `HeightCalculator` sizes a target element so that it fills the remaining viewport height.
///
/// The available height is the viewport height minus the rendered heights of the sibling
/// elements and minus the offset, clamped to the minimum height. Measurement is best-effort:
///
/// - A sibling whose identifier doesn't resolve contributes nothing.
/// - If the target isn't attached, the style write is skipped but the height is still derived.
///
/// Neither case is an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeightCalculator {
    target: ElementRef,
    sibling_ids: Arc<[String]>,
    options: HeightOptions,
}

impl HeightCalculator {
    /// Creates a calculator for the target, subtracting the heights of the given siblings.
    pub fn new<I, S>(target: ElementRef, sibling_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target,
            sibling_ids: sibling_ids.into_iter().map(Into::into).collect(),
            options: HeightOptions::default(),
        }
    }

    /// Replaces the calculator's options.
    pub fn with_options(mut self, options: HeightOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the minimum height.
    pub fn with_min_height(mut self, min_height: i32) -> Self {
        self.options.min_height = min_height;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.options.offset = offset;
        self
    }

    /// Returns the target element handle.
    pub fn target(&self) -> &ElementRef {
        &self.target
    }

    /// Returns the sibling identifiers in the order they were given.
    pub fn sibling_ids(&self) -> &[String] {
        &self.sibling_ids
    }

    /// Returns the calculator's options.
    pub fn options(&self) -> HeightOptions {
        self.options
    }

    /// Sums the current rendered heights of the siblings that exist.
    pub fn sibling_height(&self, host: &dyn Host) -> i32 {
        self.sibling_ids
            .iter()
            .filter_map(|id| host.element_by_id(id))
            .map(|node| host.offset_height(node))
            .fold(0, i32::saturating_add)
    }

    /// Derives the height from the current state of the host without writing anything.
    pub fn measure(&self, host: &dyn Host) -> i32 {
        derived_height(
            host.viewport_height(),
            self.sibling_height(host),
            self.options,
        )
    }

    /// Derives the height and writes it to the target, if the target is attached.
    pub fn recompute(&self, host: &dyn Host) -> i32 {
        let height = self.measure(host);
        match self.target.current() {
            Some(node) => host.set_height(node, Px(height)),
            None => trace!("target is detached, skipping style write"),
        }
        trace!(height, "recomputed height");
        height
    }

    /// Recomputes on every resize signal, passing each result to `on_change`.
    ///
    /// The listener stays registered until the returned subscription is dropped.
    pub fn subscribe<F>(
        &self,
        host: &Arc<dyn Host>,
        on_change: F,
    ) -> Result<ResizeSubscription, HostError>
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        let calculator = self.clone();
        ResizeSubscription::new(
            host,
            Arc::new(move |host: &dyn Host| on_change(calculator.recompute(host))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockHost;
    use std::sync::Mutex;

    fn page() -> (Arc<MockHost>, ElementRef) {
        let host = Arc::new(MockHost::new(900));
        host.insert_element("a", 100);
        host.insert_element("b", 60);
        let target = ElementRef::new();
        target.attach(host.create_element(0));
        (host, target)
    }

    #[test]
    fn test_derived_height() {
        let options = HeightOptions {
            min_height: 635,
            offset: 28,
        };
        assert_eq!(derived_height(900, 160, options), 712);
        assert_eq!(derived_height(700, 160, options), 635);
        assert_eq!(derived_height(100, 300, HeightOptions::default()), 0);
        assert_eq!(
            derived_height(
                100,
                300,
                HeightOptions {
                    min_height: -1000,
                    offset: 0,
                }
            ),
            -200
        );
        assert_eq!(
            derived_height(500, 0, HeightOptions { min_height: 0, offset: -20 }),
            520
        );
        assert_eq!(
            derived_height(i32::MIN, i32::MAX, HeightOptions::default()),
            0
        );
    }

    #[test]
    fn test_recompute() {
        let (host, target) = page();
        let calculator = HeightCalculator::new(target.clone(), ["a", "b"])
            .with_min_height(635)
            .with_offset(28);

        assert_eq!(calculator.sibling_height(&*host), 160);
        assert_eq!(calculator.recompute(&*host), 712);
        let node = target.current().unwrap();
        assert_eq!(host.style_height(node).as_deref(), Some("712px"));

        host.set_viewport_height(700);
        assert_eq!(calculator.recompute(&*host), 635);
        assert_eq!(host.style_height(node).as_deref(), Some("635px"));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (host, target) = page();
        let calculator = HeightCalculator::new(target.clone(), ["a", "b"]).with_offset(28);

        let first = calculator.recompute(&*host);
        let node = target.current().unwrap();
        let first_style = host.style_height(node);
        let second = calculator.recompute(&*host);
        assert_eq!(first, second);
        assert_eq!(first_style, host.style_height(node));
    }

    #[test]
    fn test_missing_sibling_contributes_nothing() {
        let (host, target) = page();
        let calculator = HeightCalculator::new(target, ["a", "missing", "b"]).with_offset(28);
        assert_eq!(calculator.sibling_height(&*host), 160);

        host.remove_element_by_id("b");
        assert_eq!(calculator.sibling_height(&*host), 100);
        assert_eq!(calculator.measure(&*host), 772);
    }

    #[test]
    fn test_duplicate_siblings_count_twice() {
        let (host, target) = page();
        let calculator = HeightCalculator::new(target, ["a", "a"]);
        assert_eq!(calculator.sibling_height(&*host), 200);
    }

    #[test]
    fn test_detached_target_skips_write() {
        let (host, target) = page();
        let node = target.detach().unwrap();
        let calculator = HeightCalculator::new(target, ["a", "b"]).with_offset(28);

        assert_eq!(calculator.recompute(&*host), 712);
        assert_eq!(host.style_height(node), None);
        assert_eq!(host.style_writes(), 0);
    }

    #[test]
    fn test_measure_does_not_write() {
        let (host, target) = page();
        let calculator = HeightCalculator::new(target, ["a"]);
        assert_eq!(calculator.measure(&*host), 800);
        assert_eq!(host.style_writes(), 0);
    }

    #[test]
    fn test_subscribe() {
        let (mock, target) = page();
        let host: Arc<dyn Host> = mock.clone();
        let calculator = HeightCalculator::new(target, ["a", "b"])
            .with_options(HeightOptions {
                min_height: 635,
                offset: 28,
            });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let subscription = calculator
            .subscribe(&host, {
                let seen = seen.clone();
                move |height| seen.lock().unwrap().push(height)
            })
            .unwrap();

        mock.resize(1000);
        mock.resize(700);
        assert_eq!(*seen.lock().unwrap(), vec![812, 635]);

        drop(subscription);
        mock.resize(900);
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(mock.style_writes(), 2);
    }
}
