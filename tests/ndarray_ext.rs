//! Integration tests for ndarray support
//!
//! These tests demonstrate writing ndarray tensors as records and reading
//! them back through the index.

#![cfg(feature = "ndarray")]

use ndarray::{ArrayD, IxDyn, array, s};
use tbf::{DType, TensorItem, parse, to_bytes};

#[test]
fn roundtrip_training_batch() {
    let images = ArrayD::<f32>::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| {
        (idx[0] * 12 + idx[1] * 4 + idx[2]) as f32 * 0.5
    });
    let labels = array![3i64, 7].into_dyn();
    let mask = array![true, false].into_dyn();

    let records = vec![
        vec![
            TensorItem::from_ndarray("images", &images).unwrap(),
            TensorItem::from_ndarray("labels", &labels).unwrap(),
        ],
        vec![TensorItem::from_ndarray("mask", &mask).unwrap()],
    ];
    let bytes = to_bytes(&records, 4096).unwrap();
    let view = parse(&bytes).unwrap();

    let back: ArrayD<f32> = view.get(0, "images").unwrap().to_ndarray().unwrap();
    assert_eq!(back, images);
    let back: ArrayD<i64> = view.get(0, "labels").unwrap().to_ndarray().unwrap();
    assert_eq!(back, labels);
    let back: ArrayD<bool> = view.get(1, "mask").unwrap().to_ndarray().unwrap();
    assert_eq!(back, mask);
}

#[test]
fn sliced_view_is_written_in_logical_order() {
    let matrix = array![[1u8, 2, 3], [4, 5, 6], [7, 8, 9]];
    let column = matrix.slice(s![.., 1]);
    let item = TensorItem::from_ndarray("column", &column).unwrap();
    assert_eq!(item.dtype(), Some(DType::UInt8));
    assert_eq!(item.shape, vec![3]);

    let bytes = to_bytes([[item]], 64).unwrap();
    let view = parse(&bytes).unwrap();
    assert_eq!(view.get(0, "column").unwrap().data, &[2, 5, 8]);
}

#[test]
fn empty_array_roundtrip() {
    let empty = ArrayD::<f64>::zeros(IxDyn(&[0, 3]));
    let bytes = to_bytes([[TensorItem::from_ndarray("empty", &empty).unwrap()]], 64).unwrap();
    let view = parse(&bytes).unwrap();

    let tensor = view.get(0, "empty").unwrap();
    assert_eq!(tensor.shape, &[0, 3]);
    let back: ArrayD<f64> = tensor.to_ndarray().unwrap();
    assert_eq!(back.shape(), &[0, 3]);
}
