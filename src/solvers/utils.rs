use crate::{
    aa::{AAFramework, Argument, LabelType},
    circ::Model,
    encodings::VarAllocator,
};

// Translates a model returned by the solver into the corresponding set of arguments, sorted by index.
pub(crate) fn model_to_extension<'a, T>(
    model: &Model,
    af: &'a AAFramework<T>,
    vars: &VarAllocator,
) -> Vec<&'a Argument<T>>
where
    T: LabelType,
{
    let mut ids = model
        .iter()
        .filter_map(|v| vars.arg_id_from_truth_var(*v))
        .collect::<Vec<usize>>();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter()
        .map(|id| af.argument_set().get_argument_by_id(id))
        .collect()
}
