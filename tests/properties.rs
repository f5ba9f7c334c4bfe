use imgview::ndarray::{ArrayD, IxDyn, SliceInfoElem};
use imgview::{ChannelTag, ImageView, Provenance};
use proptest::prelude::*;
use test_strategy::proptest;

/// Selection along one axis.
#[derive(Debug, Clone, Copy)]
enum AxisSel {
    Index(usize),
    Range(usize, usize),
    Stepped(usize, usize, isize),
    NewAxis,
}

impl AxisSel {
    fn elem(self) -> SliceInfoElem {
        match self {
            AxisSel::Index(i) => SliceInfoElem::Index(i as isize),
            AxisSel::Range(start, end) => AxisSel::Stepped(start, end, 1).elem(),
            AxisSel::Stepped(start, end, step) => SliceInfoElem::Slice {
                start: start as isize,
                end: Some(end as isize),
                step,
            },
            AxisSel::NewAxis => SliceInfoElem::NewAxis,
        }
    }

    /// Length of the resulting axis, `None` if the axis is removed.
    fn len(self) -> Option<usize> {
        match self {
            AxisSel::Index(_) => None,
            AxisSel::Range(start, end) => Some(end - start),
            AxisSel::Stepped(start, end, step) => {
                let step = step.unsigned_abs();
                Some((end - start).div_ceil(step))
            }
            AxisSel::NewAxis => Some(1),
        }
    }
}

fn range(dim: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..=dim).prop_flat_map(move |start| (Just(start), start..=dim))
}

fn axis_sel(dim: usize) -> BoxedStrategy<AxisSel> {
    prop_oneof![
        (0..dim).prop_map(AxisSel::Index),
        range(dim).prop_map(|(start, end)| AxisSel::Range(start, end)),
        (range(dim), prop_oneof![-3isize..=-1, 2isize..=3])
            .prop_map(|((start, end), step)| AxisSel::Stepped(start, end, step)),
    ]
    .boxed()
}

/// Selections for one input axis, optionally preceded by a new unit axis.
fn axis_sels(dim: usize) -> impl Strategy<Value = Vec<AxisSel>> {
    (any::<bool>(), axis_sel(dim)).prop_map(|(lead, sel)| {
        if lead {
            vec![AxisSel::NewAxis, sel]
        } else {
            vec![sel]
        }
    })
}

fn slice_case() -> impl Strategy<Value = (Vec<usize>, Vec<AxisSel>)> {
    prop::collection::vec(1usize..6, 1..=4).prop_flat_map(|shape| {
        let sels: Vec<_> = shape.iter().map(|&d| axis_sels(d)).collect();
        (Just(shape), sels.prop_map(|per_axis| per_axis.concat()))
    })
}

fn any_tag() -> impl Strategy<Value = ChannelTag> {
    prop_oneof![
        Just(ChannelTag::Image),
        Just(ChannelTag::Bgr),
        Just(ChannelTag::Rgb),
        Just(ChannelTag::Gray),
    ]
}

fn color_tag() -> impl Strategy<Value = ChannelTag> {
    prop_oneof![Just(ChannelTag::Bgr), Just(ChannelTag::Rgb)]
}

fn view_of(tag: ChannelTag, shape: &[usize], provenance: Provenance) -> ImageView<u8> {
    ImageView::with_tag(tag, ArrayD::<u8>::zeros(IxDyn(shape)), provenance)
}

#[proptest(cases = 64)]
fn construct_preserves_provenance(#[strategy(any_tag())] tag: ChannelTag, origin: String) {
    let view = view_of(tag, &[2, 2, 3], Provenance::from(origin.as_str()));
    prop_assert_eq!(view.provenance().as_str(), Some(origin.as_str()));
    prop_assert_eq!(view.tag(), tag);
}

#[proptest(cases = 256)]
fn slice_shape_tag_and_provenance(
    #[strategy(any_tag())] tag: ChannelTag,
    #[strategy(slice_case())] case: (Vec<usize>, Vec<AxisSel>),
) {
    let (shape, sels) = case;
    let view = view_of(tag, &shape, Provenance::from("origin.png"));
    let spec: Vec<SliceInfoElem> = sels.iter().map(|s| s.elem()).collect();
    let expected: Vec<usize> = sels.iter().filter_map(|s| s.len()).collect();

    let child = view.index(&spec);

    prop_assert_eq!(child.shape(), expected.as_slice());
    prop_assert_eq!(child.provenance(), view.provenance());
    let want = match tag {
        ChannelTag::Bgr | ChannelTag::Rgb if expected.len() == 2 => ChannelTag::Gray,
        other => other,
    };
    prop_assert_eq!(child.tag(), want);
    prop_assert_eq!(view.tag(), tag);
}

#[proptest(cases = 64)]
fn gray_is_terminal(#[strategy(slice_case())] case: (Vec<usize>, Vec<AxisSel>)) {
    let (shape, sels) = case;
    let view = view_of(ChannelTag::Gray, &shape, Provenance::none());
    let spec: Vec<SliceInfoElem> = sels.iter().map(|s| s.elem()).collect();
    let child = view.index(spec);
    prop_assert_eq!(child.tag(), ChannelTag::Gray);
    prop_assert!(!child.provenance().is_known());
}

#[proptest(cases = 64)]
fn three_dim_color_slices_keep_tag(
    #[strategy(1usize..8)] h: usize,
    #[strategy(1usize..8)] w: usize,
    #[strategy(color_tag())] tag: ChannelTag,
) {
    let view = view_of(tag, &[h, w, 3], Provenance::from("color.png"));
    let child = view.crop(0, 0, h, w);
    prop_assert_eq!(child.shape(), &[h, w, 3][..]);
    prop_assert_eq!(child.tag(), tag);

    let plane = view.channel(0);
    prop_assert_eq!(plane.shape(), &[h, w][..]);
    prop_assert_eq!(plane.tag(), ChannelTag::Gray);
}

#[proptest(cases = 64)]
fn new_axis_on_color_line_downgrades(
    #[strategy(1usize..8)] len: usize,
    #[strategy(color_tag())] tag: ChannelTag,
    leading: bool,
) {
    let line = view_of(tag, &[len], Provenance::from("line.png"));
    let full = SliceInfoElem::Slice {
        start: 0,
        end: None,
        step: 1,
    };
    let spec = if leading {
        [SliceInfoElem::NewAxis, full]
    } else {
        [full, SliceInfoElem::NewAxis]
    };
    let lifted = line.index(spec);
    prop_assert_eq!(lifted.ndim(), 2);
    prop_assert_eq!(lifted.tag(), ChannelTag::Gray);
    prop_assert_eq!(lifted.provenance().as_str(), Some("line.png"));
}
