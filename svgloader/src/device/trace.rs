use crate::{
    device::{Device, Patch},
    error::Result,
    geom::coordinate::Matrix,
};

#[derive(Debug, Default)]
pub struct TraceDevice {
    view: Matrix,
    patches: Vec<Patch>,
}

impl TraceDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view_transform(view: Matrix) -> Self {
        TraceDevice {
            view,
            patches: Vec::new(),
        }
    }

    pub fn patches(&self) -> &[Patch] {
        self.patches.as_slice()
    }

    pub fn content(&self) -> String {
        let mut res = String::new();
        res.push_str("<trace>\n");
        for patch in self.patches.iter() {
            let m = &patch.transform;
            res.push_str(
                format!(
                    "<patch fill=\"{}\" alpha=\"{}\" transform=\"{} {} {} {} {} {}\">\n",
                    patch.fill, patch.alpha, m.a, m.b, m.c, m.d, m.e, m.f
                )
                .as_str(),
            );
            for sub in patch.path.sub_paths() {
                res.push_str("<subpath>\n");
                for seg in sub.segments() {
                    res.push_str(seg.dump_xml().as_str());
                }
                res.push_str("</subpath>\n");
            }
            res.push_str("</patch>\n");
        }
        res.push_str("</trace>\n");
        res
    }
}

impl Device for TraceDevice {
    fn view_transform(&self) -> Matrix {
        self.view
    }

    fn add_patch(&mut self, patch: Patch) -> Result<()> {
        self.patches.push(patch);
        Ok(())
    }
}
