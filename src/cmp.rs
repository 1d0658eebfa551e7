use std::cmp::Ordering;

fn cmp<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).expect("unorderable value (NaN) in a Flow/Cost comparison")
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    cmp(a, b) == Ordering::Less
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    cmp(a, b) != Ordering::Greater
}

pub(crate) fn gt<T: PartialOrd>(a: T, b: T) -> bool {
    cmp(a, b) == Ordering::Greater
}

pub(crate) fn ge<T: PartialOrd>(a: T, b: T) -> bool {
    cmp(a, b) != Ordering::Less
}

pub(crate) fn eq<T: PartialOrd>(a: T, b: T) -> bool {
    cmp(a, b) == Ordering::Equal
}

pub(crate) fn ne<T: PartialOrd>(a: T, b: T) -> bool {
    !eq(a, b)
}

pub(crate) fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if le(a, b) {
        a
    } else {
        b
    }
}
