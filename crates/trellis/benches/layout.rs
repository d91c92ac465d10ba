//! Layout resolution benchmarks.

use std::{hint::black_box, rc::Rc};

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use trellis::{
    DataSource, LayoutEngine, LayoutStyle, Node, NodeId, Result, Tree,
    geom::{Edges, Rect},
};

/// A wide tree: rows of flex cells, a grid, and a bound list.
fn build(rows: usize, cols: usize, items: usize) -> Result<(Tree, NodeId, Rc<DataSource>)> {
    let mut t = Tree::new();
    let root = t.insert(
        Node::container()
            .with_rect(Rect::new(0, 0, 1920, 1080))
            .with_style(LayoutStyle::vertical().padding(Edges::all(4)).spacing(2)),
    );
    for _ in 0..rows {
        let row = t.insert_child(
            root,
            Node::container()
                .fixed_height(20)
                .with_style(LayoutStyle::horizontal().spacing(1)),
        )?;
        for c in 0..cols {
            t.insert_child(row, Node::leaf().flex((c % 3 + 1) as f32))?;
        }
    }
    let grid = t.insert_child(root, Node::grid(8).flex(1.0))?;
    for _ in 0..64 {
        t.insert_child(grid, Node::leaf())?;
    }

    let records: Vec<_> = (0..items)
        .map(|i| json!({"name": format!("row {i}"), "n": i}))
        .collect();
    let data = DataSource::from_json(&Value::Array(records).to_string())?;
    let list = t.insert_child(root, Node::list().flex(1.0))?;
    let tmpl = t.insert(Node::leaf().fixed_height(16).with_text("${name}: ${n}"));
    t.set_template(list, tmpl)?;
    t.bind_data(list, &data)?;
    Ok((t, root, data))
}

fn benchmark_resolve(c: &mut Criterion) {
    c.bench_function("resolve_wide_tree", |b| {
        let (mut tree, root, _data) = build(40, 24, 200).expect("failed to build tree");
        let engine = LayoutEngine::default();
        b.iter(|| {
            engine.resolve(&mut tree, root);
            black_box(tree.len());
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_resolve
}
criterion_main!(benches);
