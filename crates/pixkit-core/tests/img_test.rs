//! Buffer, boundary and interpolation tests for pixkit-core.

use approx::assert_relative_eq;
use pixkit_core::{BoundaryMode, Channel, ColorImg, Img, ImgBase, PixelBase, Rect};

fn boundary_img() -> Img {
    Img::from_data(4, 4, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 9, 9, 9, 9]).unwrap()
}

/// 0..16 on a 4x4 grid.
fn sequence_img() -> Img {
    Img::from_data(4, 4, (0..16).collect()).unwrap()
}

/// `sequence_img` after copying its top-left 3x3 block one pixel down-right.
const SHIFTED_DOWN_RIGHT: [u32; 16] = [0, 1, 2, 3, 4, 0, 1, 2, 8, 4, 5, 6, 12, 8, 9, 10];

/// x + 2y on a 5x3 grid.
fn ramp() -> Img {
    let data = (0..3).flat_map(|y| (0..5).map(move |x| x + 2 * y)).collect();
    Img::from_data(5, 3, data).unwrap()
}

#[test]
fn test_boundary_corners_all_modes() {
    let img = boundary_img();
    for mode in BoundaryMode::ALL {
        assert_eq!(img.get_value(0, 0, mode), 0, "{mode}");
        assert_eq!(img.get_value(3, 0, mode), 3, "{mode}");
        assert_eq!(img.get_value(0, 3, mode), 9, "{mode}");
        assert_eq!(img.get_value(3, 3, mode), 9, "{mode}");
    }
}

#[test]
fn test_boundary_zero() {
    let img = boundary_img();
    let m = BoundaryMode::Zero;
    assert_eq!(img.get_value(-1, 0, m), 0);
    assert_eq!(img.get_value(4, 0, m), 0);
    assert_eq!(img.get_value(0, -1, m), 0);
    assert_eq!(img.get_value(0, 4, m), 0);
    // in-range 5 at (1,1) vs. outside neighbour
    assert_eq!(img.get_value(1, 1, m), 5);
    assert_eq!(img.get_value(1, -3, m), 0);
}

#[test]
fn test_boundary_repeat_edge() {
    let img = boundary_img();
    let m = BoundaryMode::RepeatEdge;
    assert_eq!(img.get_value(-2, 0, m), 0);
    assert_eq!(img.get_value(3, -2, m), 3);
    assert_eq!(img.get_value(-10, 10, m), 9);
    assert_eq!(img.get_value(10, -10, m), 3);
}

#[test]
fn test_boundary_repeat_image() {
    let img = boundary_img();
    let m = BoundaryMode::RepeatImage;
    for y in 0..4 {
        for x in 0..4 {
            let v = img.get_value(x, y, m);
            assert_eq!(img.get_value(x + 4, y, m), v);
            assert_eq!(img.get_value(x - 4, y, m), v);
            assert_eq!(img.get_value(x, y + 4, m), v);
            assert_eq!(img.get_value(x, y - 4, m), v);
            assert_eq!(img.get_value(x + 8, y + 8, m), v);
            assert_eq!(img.get_value(x - 8, y - 8, m), v);
        }
    }
}

#[test]
fn test_boundary_mirror() {
    let img = boundary_img();
    let m = BoundaryMode::Mirror;
    for y in 0..4 {
        for x in 0..4 {
            let v = img.get_value(x, y, m);
            assert_eq!(img.get_value(x + 8, y + 8, m), v);
            assert_eq!(img.get_value(7 - x, 7 - y, m), v);
            assert_eq!(img.get_value(x - 8, y - 8, m), v);
            assert_eq!(img.get_value(-1 - x, -1 - y, m), v);
        }
    }
}

#[test]
fn test_planar_boundary_matches_packed() {
    let img = boundary_img();
    let planar = ColorImg::from_img(&img, true);
    for mode in BoundaryMode::ALL {
        for (x, y) in [(-1, 0), (5, 2), (-7, -7), (2, 9)] {
            let packed = img.get_value(x, y, mode) as f64 / 255.0;
            assert_relative_eq!(planar.value(Channel::B, x, y, mode), packed, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_interpolate_corners() {
    let img = ramp();
    assert_eq!(img.interpolate(0.0, 0.0), img.get(0, 0));
    assert_eq!(img.interpolate(1.0, 0.0), img.get(4, 0));
    assert_eq!(img.interpolate(0.0, 1.0), img.get(0, 2));
    assert_eq!(img.interpolate(1.0, 1.0), img.get(4, 2));

    let planar = ColorImg::from_img(&img, false);
    for (u, v, x, y) in [(0.0, 0.0, 0, 0), (1.0, 0.0, 4, 0), (0.0, 1.0, 0, 2), (1.0, 1.0, 4, 2)] {
        assert_eq!(planar.interpolate(Channel::B, u, v), planar.get(Channel::B, x, y));
    }
}

#[test]
fn test_interpolate_center_of_ramp() {
    let img = ramp();
    assert_eq!(img.interpolate(0.5, 0.5), 4);

    let planar = ColorImg::from_img(&img, false);
    assert_relative_eq!(planar.interpolate(Channel::B, 0.5, 0.5), 4.0 / 255.0, epsilon = 1e-12);
    // halfway between (0,0)=0 and (1,0)=1 on the x axis
    assert_relative_eq!(planar.interpolate(Channel::B, 0.125, 0.0), 0.5 / 255.0, epsilon = 1e-12);
}

#[test]
fn test_copy_area_self_overlap() {
    let mut img = boundary_img();
    img.copy_area_within(Rect::new(1, 1, 2, 2), 0, 0);
    // source block [5, 6; 9, 9] read before (1,1) gets overwritten
    assert_eq!(img.get(0, 0), 5);
    assert_eq!(img.get(1, 0), 6);
    assert_eq!(img.get(0, 1), 9);
    assert_eq!(img.get(1, 1), 9);
    // outside the destination untouched
    assert_eq!(img.get(2, 0), 2);
    assert_eq!(img.get(2, 1), 6);
}

#[test]
fn test_planar_copy_area_self_overlap() {
    let mut img = ColorImg::from_img(&boundary_img(), true);
    img.copy_area_within(Rect::new(1, 1, 2, 2), 0, 0);
    assert_relative_eq!(img.get(Channel::B, 0, 0), 5.0 / 255.0);
    assert_relative_eq!(img.get(Channel::B, 1, 1), 9.0 / 255.0);
}

#[test]
fn test_copy_area_self_overlap_down_right() {
    // each source row is overwritten before a row-by-row copy would read it
    let mut img = sequence_img();
    img.copy_area_within(Rect::new(0, 0, 3, 3), 1, 1);
    assert_eq!(img.data(), &SHIFTED_DOWN_RIGHT[..]);
}

#[test]
fn test_planar_copy_area_self_overlap_down_right() {
    let mut img = ColorImg::from_img(&sequence_img(), true);
    img.copy_area_within(Rect::new(0, 0, 3, 3), 1, 1);
    assert_eq!(img.to_img().data(), &SHIFTED_DOWN_RIGHT[..]);
    assert_relative_eq!(img.get(Channel::B, 3, 3), 10.0 / 255.0);
    assert_relative_eq!(img.get(Channel::B, 1, 1), 0.0);
}

#[test]
fn test_copy_area_clipped() {
    let src = boundary_img();
    let mut dst = Img::new(3, 3);
    // (-1,-1) cut on the source moves the destination to (1,1)
    src.copy_area_to(Rect::new(-1, -1, 3, 3), &mut dst, 0, 0);
    assert_eq!(dst.get(0, 0), 0);
    assert_eq!(dst.get(1, 1), 0);
    assert_eq!(dst.get(2, 1), 1);
    assert_eq!(dst.get(1, 2), 4);
    assert_eq!(dst.get(2, 2), 5);

    // fully outside is a no-op
    let before = dst.clone();
    src.copy_area_to(Rect::new(10, 10, 2, 2), &mut dst, 0, 0);
    assert_eq!(dst, before);
}

#[test]
fn test_copy_area_new_image() {
    let src = boundary_img();
    let out = src.copy_area(Rect::new(2, 1, 3, 2)).unwrap();
    assert_eq!(out.dimensions(), (3, 2));
    assert_eq!(out.data(), &[6, 7, 0, 9, 9, 0]);
    assert!(src.copy_area(Rect::new(0, 0, 0, 2)).is_err());
}

#[test]
fn test_read_cursor_repositions() {
    let img = boundary_img();
    let mut px = ImgBase::pixel(&img, 0, 0);
    px.set_position(1, 2);
    assert_eq!(px.index(), 9);
    assert_eq!(px.value(), 9);
    assert_relative_eq!(px.b(), 9.0 / 255.0);
    assert_eq!(img.pixels().count(), 16);
}
