//! Owned application state: source pixels, filter values and display sinks

use crate::{
    FilterError, FilterParameter, FilterPipeline, FilterResult, FilterState, LabelSink,
    OutputSink, PixelBuffer, RawValue,
};

pub struct Session<S: OutputSink, L: LabelSink = ()> {
    source: Option<PixelBuffer>,
    state: FilterState,
    pipeline: FilterPipeline,
    sink: S,
    labels: L,
}

impl<S: OutputSink> Session<S, ()> {
    pub fn without_labels(sink: S) -> Self {
        Self::new(sink, ())
    }
}

impl<S: OutputSink, L: LabelSink> Session<S, L> {
    /// Create an empty session and publish the default label values
    pub fn new(sink: S, labels: L) -> Self {
        let mut session = Self {
            source: None,
            state: FilterState::default(),
            pipeline: FilterPipeline::new(),
            sink,
            labels,
        };

        session.refresh_labels();
        session
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    /// Replace the source image and present it unfiltered.
    ///
    /// Filter values are kept across loads, so the labels may show non-zero
    /// offsets over an unfiltered frame until the next accepted change.
    pub fn load_image(&mut self, source: PixelBuffer) -> FilterResult<()> {
        log::info!("load source image {}x{}", source.width(), source.height());

        self.sink
            .present(source.as_bytes(), source.width(), source.height())?;
        self.pipeline.reset();
        self.source = Some(source);
        Ok(())
    }

    /// Apply one input event. Returns `true` when the value was accepted,
    /// which also recomputed the image and refreshed the labels.
    pub fn try_set(&mut self, name: &str, value: Option<RawValue>) -> bool {
        match self.update(name, value) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("rejected {name}={value:?}: {e}");
                false
            }
        }
    }

    /// Same as [`Session::try_set`] with the rejection reason.
    ///
    /// A failing sink does not undo an accepted value; the failure is logged
    /// and the next accepted change presents a fresh frame.
    pub fn update(&mut self, name: &str, value: Option<RawValue>) -> FilterResult<FilterParameter> {
        if !self.is_ready() {
            return Err(FilterError::NoSource);
        }

        let parameter = self.state.update_by_name(name, value)?;
        log::debug!("{parameter} -> {:?}", self.state.get(parameter));

        if let Err(e) = self.recompute() {
            log::warn!("present filtered image failed: {e}");
        }

        self.refresh_labels();
        Ok(parameter)
    }

    /// Full recompute with the current state. No-op without a source.
    pub fn recompute(&mut self) -> FilterResult<bool> {
        self.pipeline
            .recompute(self.source.as_ref(), &self.state, &mut self.sink)
    }

    pub fn refresh_labels(&mut self) {
        for parameter in FilterParameter::numeric() {
            let text = self.state.amount(parameter).to_string();
            self.labels.refresh_label(parameter, &text);
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn working(&self) -> Option<&PixelBuffer> {
        self.pipeline.working()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LabelBoard, MemorySink};

    fn red_session() -> Session<MemorySink, LabelBoard> {
        let mut session = Session::new(MemorySink::new(), LabelBoard::new());
        let source = PixelBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        session.load_image(source).unwrap();
        session
    }

    #[test]
    fn test_new_session_publishes_labels() {
        let session = Session::new(MemorySink::new(), LabelBoard::new());
        assert_eq!(session.labels().refreshes(), 4);
        assert_eq!(session.labels().text(FilterParameter::Brightness), Some("0"));
        assert_eq!(session.labels().text(FilterParameter::Grayscale), None);
    }

    #[test]
    fn test_not_ready_rejects_updates() {
        let mut session = Session::without_labels(MemorySink::new());
        assert!(!session.is_ready());
        assert!(!session.try_set("brightness", Some(10.into())));
        assert_eq!(session.state(), &FilterState::new());
        assert!(!session.recompute().unwrap());
        assert_eq!(session.sink().presented(), 0);
    }

    #[test]
    fn test_load_presents_source() {
        let session = red_session();
        assert!(session.is_ready());
        assert_eq!(session.sink().presented(), 1);
        assert_eq!(session.sink().frame(), session.source());
    }

    #[test]
    fn test_accepted_update_recomputes_once() {
        let mut session = red_session();
        assert!(session.try_set("greenChannel", Some(40.into())));
        assert_eq!(session.sink().presented(), 2);

        let frame = session.sink().frame().unwrap();
        assert_eq!(frame.pixel(0, 0), [255, 40, 0, 255]);
        assert_eq!(frame.pixel(1, 0), [0, 40, 255, 128]);
        assert_eq!(session.labels().text(FilterParameter::GreenChannel), Some("40"));
    }

    #[test]
    fn test_rejected_update_has_no_side_effects() {
        let mut session = red_session();
        let refreshes = session.labels().refreshes();

        assert!(!session.try_set("contrast", Some(10.into())));
        assert!(!session.try_set("brightness", None));
        assert!(!session.try_set("brightness", Some(true.into())));
        assert!(!session.try_set("grayscale", Some(1.into())));
        assert!(!session.try_set("redChannel", Some(256.into())));
        assert!(!session.try_set("redChannel", Some(0.into())));
        assert!(!session.try_set("grayscale", Some(false.into())));

        assert_eq!(session.sink().presented(), 1);
        assert_eq!(session.labels().refreshes(), refreshes);
        assert_eq!(session.state(), &FilterState::new());
    }

    #[test]
    fn test_grayscale_has_no_label_but_refreshes_others() {
        let mut session = red_session();
        let refreshes = session.labels().refreshes();

        assert!(session.try_set("grayscale", Some(true.into())));
        assert_eq!(session.labels().refreshes(), refreshes + 4);
        assert_eq!(session.labels().text(FilterParameter::Grayscale), None);
    }

    #[test]
    fn test_update_reports_reason() {
        let mut session = red_session();
        assert!(matches!(
            session.update("brightness", Some((-300).into())),
            Err(FilterError::OutOfRange { .. })
        ));
        assert_eq!(
            session.update("brightness", Some((-30).into())).unwrap(),
            FilterParameter::Brightness
        );
    }

    #[test]
    fn test_state_survives_new_image() {
        let mut session = red_session();
        assert!(session.try_set("blueChannel", Some(9.into())));

        let source = PixelBuffer::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
        session.load_image(source.clone()).unwrap();

        assert_eq!(session.state().amount(FilterParameter::BlueChannel), 9);
        assert_eq!(session.sink().frame(), Some(&source));
        assert!(session.working().is_none());

        assert!(session.try_set("blueChannel", Some(10.into())));
        assert_eq!(session.sink().frame().unwrap().pixel(0, 0), [1, 2, 13, 4]);
    }
}
