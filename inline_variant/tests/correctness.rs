use std::cell::Cell;
use std::rc::Rc;

use inline_variant::index::{
    Position,
    I0,
    I15,
    I3,
};
use inline_variant::{
    BadAccess,
    Catalog,
    Variant,
};
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};
use test_case::test_case;

type Mixed = (i32, f64, String, Vec<u8>, char);

type Sixteen = (
    u8,
    u16,
    u32,
    u64,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    bool,
    char,
    String,
    Vec<u8>,
    Box<str>,
    (),
);

#[test_case(Variant::new(1_i32) => Some(0); "integer")]
#[test_case(Variant::new(1.5_f64) => Some(1); "float")]
#[test_case(Variant::new(String::from("text")) => Some(2); "string")]
#[test_case(Variant::new(vec![1_u8]) => Some(3); "bytes")]
#[test_case(Variant::new('c') => Some(4); "char")]
#[test_case(Variant::empty() => None; "empty")]
fn test_index(variant: Variant<Mixed>) -> Option<usize> {
    variant.index()
}

#[test_case(Variant::new(1_i32) => "i32")]
#[test_case(Variant::new('c') => "char")]
#[test_case(Variant::new(vec![1_u8]) => std::any::type_name::<Vec<u8>>())]
fn test_type_name(variant: Variant<Mixed>) -> &'static str {
    variant.type_name().unwrap()
}

#[test]
fn test_catalog_len() {
    assert_eq!(<Mixed as Catalog>::LEN, 5);
    assert_eq!(Variant::<Mixed>::LEN, 5);
    assert_eq!(Variant::<Sixteen>::LEN, 16);
    assert_eq!(Variant::<(u8,)>::LEN, 1);
}

#[test]
fn test_sixteen_alternatives() {
    let mut variant = Variant::<Sixteen>::new(());
    assert_eq!(variant.index(), Some(15));
    assert!(variant.holds::<(), I15>());

    variant.set(3_u64);
    assert_eq!(variant.index(), Some(I3::INDEX));
    assert!(variant.holds::<u64, I3>());

    variant.set(Box::<str>::from("boxed"));
    assert_eq!(variant.get_at::<14>().map(|boxed| &**boxed), Ok("boxed"));

    variant.set_at::<0, _>(true);
    assert_eq!(variant.get::<u8, I0>(), Ok(&1));

    let copy = variant.clone();
    assert_eq!(copy, variant);
}

#[test]
fn test_bad_access_display() {
    let variant = Variant::<Mixed>::new('c');
    let err: BadAccess = variant.get::<i32, _>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad variant access: requested `i32` (alternative 0) but the variant holds `char` (alternative 4)"
    );

    let empty = Variant::<Mixed>::empty();
    let err = empty.get_at::<1>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad variant access: requested `f64` (alternative 1) but the variant is empty"
    );

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().starts_with("bad variant access"));
}

#[test]
fn test_bad_access_propagates() {
    fn length(variant: &Variant<Mixed>) -> Result<usize, BadAccess> {
        let text = variant.get::<String, _>()?;
        Ok(text.len())
    }

    assert_eq!(length(&Variant::new(String::from("four"))), Ok(4));
    assert!(length(&Variant::new(4)).is_err());
}

#[test]
fn test_every_clone_is_dropped() {
    #[derive(Clone)]
    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Rc::new(Cell::new(0));
    {
        let original = Variant::<(u8, Counted)>::new(Counted(Rc::clone(&drops)));
        let copies: Vec<_> = (0..10).map(|_| original.clone()).collect();
        assert!(copies.iter().all(|copy| copy.index() == Some(1)));
    }
    assert_eq!(drops.get(), 11);
    assert_eq!(Rc::strong_count(&drops), 1);
}

#[test]
fn test_randomized_assignment() {
    // create an rng
    let seed: u64 = rand::thread_rng().gen();
    eprintln!("using seed: {}_u64", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let runs = option_env!("RANDOMIZED_RUNS")
        .map(|v| v.parse().expect("provided non-integer value?"))
        .unwrap_or(10_000);
    println!("Running with RANDOMIZED_RUNS: {}", runs);

    let mut variant = Variant::<Mixed>::empty();
    let mut expected: Option<usize> = None;

    for _ in 0..runs {
        match rng.gen_range(0..7) {
            0 => {
                variant.set(rng.gen::<i32>());
                expected = Some(0);
            }
            1 => {
                variant.set(rng.gen::<f64>());
                expected = Some(1);
            }
            2 => {
                variant.set(rng.gen::<u32>().to_string());
                expected = Some(2);
            }
            3 => {
                variant.set(vec![rng.gen::<u8>(); rng.gen_range(0..16)]);
                expected = Some(3);
            }
            4 => {
                variant.set(rng.gen::<char>());
                expected = Some(4);
            }
            5 => {
                variant.clear();
                expected = None;
            }
            _ => {
                // moving out and back keeps the alternative
                let moved = variant.take();
                assert!(variant.is_empty());
                variant = moved;
            }
        }

        assert_eq!(variant.index(), expected);
        assert_eq!(variant.clone(), variant);
    }
}
