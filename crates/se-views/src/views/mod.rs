//! Dashboard pages as view models

pub mod compare;
pub mod globe;
pub mod prediction;
pub mod statistics;

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::chart::{ChartRenderer, ChartSpec};
    use crate::slot::Visual;

    /// Renderer remembering every chart it drew and every release
    #[derive(Default, Clone)]
    pub struct RecordingRenderer {
        pub drawn: Rc<RefCell<Vec<ChartSpec>>>,
        pub released: Rc<RefCell<Vec<String>>>,
    }

    pub struct RecordedChart {
        title: String,
        released: Rc<RefCell<Vec<String>>>,
    }

    impl Visual for RecordedChart {
        fn release(&mut self) {
            self.released.borrow_mut().push(self.title.clone());
        }
    }

    impl ChartRenderer for RecordingRenderer {
        type Handle = RecordedChart;

        fn render(&mut self, spec: &ChartSpec) -> anyhow::Result<RecordedChart> {
            self.drawn.borrow_mut().push(spec.clone());
            Ok(RecordedChart {
                title: spec.title.clone(),
                released: self.released.clone(),
            })
        }
    }
}
