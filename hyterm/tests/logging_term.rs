mod common;

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use common::{StubFactory, StubTerm, bv};
use hyterm::prelude::*;
use hyterm::term::compare_opt;
use num_bigint::BigInt;

fn factory() -> LoggingFactory<StubFactory> {
    LoggingFactory::new(StubFactory::new())
}

fn lt(term: &Term) -> &LoggingTerm {
    term.downcast_ref::<LoggingTerm>().expect("logging term")
}

#[test]
fn symbol_mode_classification() {
    let f = factory();
    let x = f.make_symbol("x", &bv(8)).unwrap();
    assert!(x.is_symbol());
    assert!(x.is_symbolic_const());
    assert!(!x.is_param());
    assert!(!x.is_value());
    assert_eq!(x.get_op(), None);
    assert_eq!(x.repr(), "x");

    let p = f.make_param("p", &bv(8)).unwrap();
    assert!(p.is_param());
    assert!(p.is_symbol());
    assert!(!p.is_symbolic_const());

    let fun_sort = Sort::function([bv(8)], bv(8)).unwrap();
    let fun = f.make_symbol("f", &fun_sort).unwrap();
    assert!(fun.is_symbol());
    assert!(!fun.is_symbolic_const(), "functions are not constants");
}

#[test]
fn structural_rendering_follows_children() {
    let f = factory();
    let x = f.make_symbol("x", &Sort::Bool).unwrap();
    let y = f.make_symbol("y", &Sort::Bool).unwrap();
    let and = f.make_term(&Op::from(PrimOp::And), &[x.clone(), y.clone()]).unwrap();
    assert_eq!(and.repr(), "(and x y)");
    assert_eq!(and.to_string(), "(and x y)");

    let ext_op = Op::indexed(PrimOp::Extract, [3, 0]).unwrap();
    let z = f.make_symbol("z", &bv(8)).unwrap();
    let ext = f.make_term(&ext_op, &[z]).unwrap();
    assert_eq!(ext.repr(), "((_ extract 3 0) z)");
    assert_eq!(ext.get_sort(), bv(4));
}

#[test]
fn independent_constructions_compare_equal() {
    let f = factory();
    let x = f.make_symbol("x", &Sort::Bool).unwrap();
    let y = f.make_symbol("y", &Sort::Bool).unwrap();
    let and = Op::from(PrimOp::And);
    let a = f.make_term(&and, &[x.clone(), y.clone()]).unwrap();

    // Build a second wrapper by hand so the dedup table does not hand back `a`.
    let wrapped = lt(&a).wrapped().clone();
    let b = Term::new(LoggingTerm::structural(
        wrapped,
        Sort::Bool,
        and.clone(),
        vec![x.clone(), y.clone()],
    ));
    assert!(!a.ptr_eq(&b));
    assert!(a.compare(&b));
    assert_eq!(a.hash_code(), b.hash_code());

    let swapped = f.make_term(&and, &[y, x]).unwrap();
    assert!(!a.compare(&swapped), "operand order is significant");
}

#[test]
fn recorded_sort_absorbs_engine_aliasing() {
    let f = factory();
    let b = f.make_symbol("b", &Sort::Bool).unwrap();
    // The stub reports Bool as a one-bit vector, the wrapper keeps the requested sort.
    assert_eq!(lt(&b).wrapped().get_sort(), bv(1));
    assert_eq!(b.get_sort(), Sort::Bool);

    let wrapped = lt(&b).wrapped().clone();
    let as_bv = Term::new(LoggingTerm::symbol(wrapped, bv(1), "b", true));
    assert!(!b.compare(&as_bv), "same wrapped node, different recorded sort");
}

#[test]
fn children_survive_engine_rewrites() {
    let f = factory();
    let x = f.make_symbol("x", &Sort::Bool).unwrap();
    let not = Op::from(PrimOp::Not);
    let not_x = f.make_term(&not, &[x.clone()]).unwrap();
    let not_not_x = f.make_term(&not, &[not_x.clone()]).unwrap();

    // The stub collapsed the double negation.
    let inner = lt(&not_not_x).wrapped();
    assert!(inner.compare(lt(&x).wrapped()));

    assert_eq!(not_not_x.get_op(), Some(not.clone()));
    let kids: Vec<Term> = not_not_x.children().collect();
    assert_eq!(kids.len(), 1);
    assert!(kids[0].ptr_eq(&not_x));
    assert_eq!(not_not_x.repr(), "(not (not x))");
    assert_eq!(lt(&not_not_x).raw_repr(), "x");

    // Same wrapped node and sort, but a different recorded operator.
    assert!(!not_not_x.compare(&x));
    assert_eq!(not_not_x.hash_code(), x.hash_code());
}

#[test]
fn repr_is_memoized() {
    let f = factory();
    let x = f.make_symbol("x", &bv(4)).unwrap();
    let y = f.make_symbol("y", &bv(4)).unwrap();
    let add = f.make_term(&Op::from(PrimOp::BVAdd), &[x, y]).unwrap();
    assert!(!lt(&add).is_repr_cached());
    let first = add.repr();
    assert!(lt(&add).is_repr_cached());
    let second = add.repr();
    assert_eq!(first, second);
    assert_eq!(first, "(bvadd x y)");
}

#[test]
fn values_render_through_the_wrapped_term() {
    let f = factory();
    let five = f.make_value(&BigInt::from(5), &bv(8)).unwrap();
    assert_eq!(five.get_op(), None);
    assert!(five.is_value());
    assert!(!five.is_symbol());
    assert_eq!(five.to_int(), Ok(5));

    let prints = f.inner().value_prints.clone();
    assert_eq!(prints.load(Ordering::SeqCst), 0);
    assert_eq!(five.repr(), "#b00000101");
    assert_eq!(prints.load(Ordering::SeqCst), 1);
    assert_eq!(five.repr(), "#b00000101");
    assert_eq!(prints.load(Ordering::SeqCst), 1, "second render hits the cache");

    let t = f.make_bool(true).unwrap();
    assert_eq!(t.repr(), "true", "printed with the recorded Bool sort kind");
    assert_eq!(lt(&t).raw_repr(), "#stub1");
}

#[test]
fn structural_term_over_a_value_is_not_a_value() {
    let f = factory();
    let t = f.make_bool(true).unwrap();
    let not = Op::from(PrimOp::Not);
    let not_t = f.make_term(&not, &[t.clone()]).unwrap();
    let not_not_t = f.make_term(&not, &[not_t]).unwrap();
    assert!(lt(&not_not_t).wrapped().is_value());
    assert!(!not_not_t.is_value(), "recorded operator wins over the engine");
    assert_eq!(not_not_t.repr(), "(not (not true))");
}

#[test]
#[should_panic(expected = "structural term without operator")]
fn rendering_an_opless_non_value_panics() {
    let f = factory();
    let x = f.make_symbol("x", &bv(2)).unwrap();
    let broken = LoggingTerm::value(lt(&x).wrapped().clone(), bv(2));
    let _ = broken.repr();
}

#[test]
fn to_int_errors_come_from_the_wrapped_term() {
    let f = factory();
    let x = f.make_symbol("x", &bv(2)).unwrap();
    assert!(x.to_int().unwrap_err().is_not_a_value());

    let big = BigInt::from(u64::MAX) + 1u32;
    let v = f.make_value(&big, &Sort::Int).unwrap();
    assert!(v.to_int().unwrap_err().is_value_out_of_range());
}

#[test]
fn comparison_with_other_variants_is_false() {
    let f = factory();
    let x = f.make_symbol("x", &bv(2)).unwrap();
    let raw = lt(&x).wrapped().clone();
    assert!(raw.is::<StubTerm>());
    assert!(!x.compare(&raw));
    assert!(!compare_opt(Some(&x), None));
    assert!(!compare_opt(None, None));
    assert!(compare_opt(Some(&x), Some(&x)));
}

#[test]
fn cursors_walk_recorded_children() {
    let f = factory();
    let xs: Vec<Term> = (0..3)
        .map(|i| f.make_symbol(&format!("x{i}"), &Sort::Int).unwrap())
        .collect();
    let sum = f.make_term(&Op::from(PrimOp::Plus), &xs).unwrap();

    let end = sum.end();
    let mut cursor = sum.begin();
    assert_eq!(cursor.get().unwrap().repr(), "x0");
    let before = cursor.post_advance();
    assert_eq!(before.get().unwrap().repr(), "x0");
    assert_eq!(cursor.get().unwrap().repr(), "x1");
    assert!(before != cursor);

    let copy = cursor.clone();
    assert!(copy == cursor);
    cursor.advance().advance();
    assert!(cursor == end);
    assert_eq!(cursor.get(), None);

    let names: Vec<String> = sum.children().map(|c| c.repr()).collect();
    assert_eq!(names, ["x0", "x1", "x2"]);
    assert_eq!(sum.num_children(), 3);

    // Cursors from a different term never compare equal.
    let other = f.make_term(&Op::from(PrimOp::Plus), &xs).unwrap();
    assert!(other.ptr_eq(&sum));
    let leaf_end = xs[0].end();
    assert!(leaf_end == xs[0].begin());
    assert!(leaf_end != end);
}

#[test]
fn terms_work_as_hash_keys() {
    let f = factory();
    let x = f.make_symbol("x", &Sort::Bool).unwrap();
    let y = f.make_symbol("y", &Sort::Bool).unwrap();
    let or = Op::from(PrimOp::Or);
    let a = f.make_term(&or, &[x.clone(), y.clone()]).unwrap();
    let b = Term::new(LoggingTerm::structural(
        lt(&a).wrapped().clone(),
        Sort::Bool,
        or,
        vec![x.clone(), y.clone()],
    ));

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
    set.insert(b);
    assert_eq!(set.len(), 1);
    set.insert(x);
    assert_eq!(set.len(), 2);
}
