//! Sizes a panel between a header and a tab bar, then drags the viewport through a few sizes.
//!
//! Run with `RUST_LOG=viewfill=trace` to see every recomputation.

use std::sync::Arc;
use viewfill::prelude::*;

struct Panel {
    height: i32,
    modal: ModalState,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let host = Arc::new(MockHost::new(900));
    host.insert_element("main-header", 100);
    host.insert_element("page-main-tabs", 60);
    let container = host.create_element(0);

    let mut mount = Mount::new(host.clone(), move |hooks: &mut Hooks, _: &()| {
        let target = hooks.use_element_ref();
        target.attach(container);
        let height = hooks.use_height_calculator(
            &target,
            ["main-header", "page-main-tabs"],
            HeightOptions {
                min_height: 635,
                offset: 28,
            },
        );
        Panel {
            height,
            modal: hooks.use_modal(),
        }
    });

    let panel = mount.settle(&());
    println!("initial: {}px", panel.height);

    for viewport in [1080, 768, 700, 900] {
        host.resize(viewport);
        let panel = mount.settle(&());
        println!(
            "viewport {}px -> panel {} (style: {})",
            viewport,
            panel.height,
            host.style_height(container).unwrap_or_default(),
        );
    }

    panel.modal.open_modal();
    println!("modal open: {}", mount.settle(&()).modal.is_open());

    mount.unmount();
    anyhow::ensure!(
        host.listener_count() == 0,
        "resize listener outlived the panel"
    );
    Ok(())
}
