//! Lays out a small card stack on the xz plane and prints where each card
//! lands. Run with `RUST_LOG=spark_flex3d=trace` to watch the scheduler.

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use spark_flex3d::prelude::*;

fn main() -> spark_flex3d::Result<()> {
    env_logger::init();

    let container = FlexContainer::new(
        Box::new(TaffySolver::new()),
        ContainerConfig::new()
            .with_size([6.0, 1.0, 3.0])
            .with_plane(Plane::Xz)
            .with_center_anchor(true)
            .with_props(
                FlexProperties::new()
                    .with_direction(FlexDirection::Row)
                    .with_padding(Edge::All, 0.1),
            )
            .on_reflow_complete(|w, h| println!("stack extent: {w:.2} x {h:.2}")),
    )?;

    let report = |name: &'static str| {
        move |t: &BoxTransform| {
            println!(
                "{name:>6}: pos ({:.2}, {:.2}, {:.2}) size {:.2} x {:.2}",
                t.x, t.y, t.z, t.width, t.height
            )
        }
    };

    let card = FlexProperties::new()
        .with_grow(1.0)
        .with_margin(Edge::All, 0.1);
    let _left = FlexItem::mount(
        &container.handle(),
        ItemConfig::new(card.clone()).on_transform_update(report("left")),
    );
    let _right = FlexItem::mount(
        &container.handle(),
        ItemConfig::new(card.clone()).on_transform_update(report("right")),
    );
    let mut first = FlexItem::mount(
        &container.handle(),
        ItemConfig::new(card.with_grow(2.0))
            .with_center_anchor(true)
            .on_transform_update(report("first")),
    );

    // Moved to the front on the next pass, alongside the initial layout.
    first.set_index(Some(0));

    while !container.tick() {
        thread::sleep(Duration::from_millis(10));
    }

    let callback: spark_flex3d::primitives::ReflowCallback = Rc::new(|_, _| println!("done"));
    container.set_on_reflow_complete(Some(callback));
    container.set_size([8.0, 1.0, 3.0]);
    container.flush();

    Ok(())
}
