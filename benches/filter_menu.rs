//! This bench test simulates filtering a wide navigation tree for a
//! multi-role principal, as happens on every navigation render.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use madrasa::{MenuItem, Principal, Role, filter_menu};

/// Generates a menu wider and deeper than any real deployment's.
fn preseed_menu() -> Vec<MenuItem> {
    let roles = [
        vec![],
        vec![Role::Student],
        vec![Role::Parent, Role::Teacher],
        vec![Role::MosqueAdmin],
        vec![Role::MinistryAdmin],
    ];

    (0..40usize)
        .map(|i| {
            let children = (0..8usize)
                .map(|j| MenuItem {
                    key: format!("item-{i}-{j}").parse().unwrap(),
                    label: format!("Item {i}.{j}"),
                    icon: None,
                    roles: roles[(i + j) % roles.len()].iter().copied().collect(),
                    link: Some(format!("/section-{i}/item-{j}")),
                    children: Vec::new(),
                })
                .collect();

            MenuItem {
                key: format!("section-{i}").parse().unwrap(),
                label: format!("Section {i}"),
                icon: None,
                roles: roles[i % roles.len()].iter().copied().collect(),
                link: None,
                children,
            }
        })
        .collect()
}

fn bench_filter_menu(c: &mut Criterion) {
    let menu = preseed_menu();
    let principal = Principal::new([Role::Student, Role::Parent]);

    c.bench_function("filter menu", |b| {
        b.iter(|| filter_menu(&menu, Some(&principal)));
    });
}

criterion_group!(benches, bench_filter_menu);
criterion_main!(benches);
