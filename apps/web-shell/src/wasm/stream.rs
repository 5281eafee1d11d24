use super::*;

    /// One EventSource per mounted home screen. Frames are full snapshots;
    /// the reducer owns the merge and the edge-triggered refresh.
    pub(super) fn ensure_job_stream() {
        if JOB_STREAM.with(|slot| slot.borrow().is_some()) {
            return;
        }
        open_job_stream();
    }

    pub(super) fn open_job_stream() {
        // Closures retired by the previous connection are safe to drop
        // here: open never runs inside one of their invocations.
        RETIRED_MESSAGE_HANDLERS.with(|slot| slot.borrow_mut().clear());
        RETIRED_ERROR_HANDLERS.with(|slot| slot.borrow_mut().clear());

        let url = jobs_stream_url();
        let source = match EventSource::new(&url) {
            Ok(source) => source,
            Err(_) => {
                console_warn("failed to open job stream");
                schedule_stream_reconnect();
                return;
            }
        };

        let epoch = STREAM_EPOCH.with(|epoch| {
            let next = epoch.get() + 1;
            epoch.set(next);
            next
        });

        let on_message = Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(
            move |event: MessageEvent| {
                let Some(data) = event.data().as_string() else {
                    return;
                };
                match serde_json::from_str::<JobSnapshotMap>(&data) {
                    Ok(jobs) => dispatch(AppAction::JobStreamFrame { jobs }),
                    Err(error) => {
                        console_warn(&format!("job stream frame failed to parse: {error}"));
                    }
                }
            },
        ));
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            if STREAM_EPOCH.with(|current| current.get()) != epoch {
                return;
            }
            close_job_stream();
            schedule_stream_reconnect();
        }));
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        JOB_STREAM.with(|slot| *slot.borrow_mut() = Some(source));
        STREAM_MESSAGE_HANDLER.with(|slot| *slot.borrow_mut() = Some(on_message));
        STREAM_ERROR_HANDLER.with(|slot| *slot.borrow_mut() = Some(on_error));
    }

    pub(super) fn close_job_stream() {
        STREAM_EPOCH.with(|epoch| epoch.set(epoch.get() + 1));
        if let Some(source) = JOB_STREAM.with(|slot| slot.borrow_mut().take()) {
            source.close();
        }
        // The error handler may be the frame calling us; its closure must
        // outlive the current invocation, so it is retired, not dropped.
        if let Some(handler) = STREAM_MESSAGE_HANDLER.with(|slot| slot.borrow_mut().take()) {
            RETIRED_MESSAGE_HANDLERS.with(|slot| slot.borrow_mut().push(handler));
        }
        if let Some(handler) = STREAM_ERROR_HANDLER.with(|slot| slot.borrow_mut().take()) {
            RETIRED_ERROR_HANDLERS.with(|slot| slot.borrow_mut().push(handler));
        }
    }

    /// Fixed 3-second backoff, then reopen if the home screen is still up
    /// and nothing else has touched the stream in the meantime.
    pub(super) fn schedule_stream_reconnect() {
        let epoch = STREAM_EPOCH.with(|epoch| epoch.get());
        spawn_local(async move {
            sleep(Duration::from_millis(STREAM_RECONNECT_DELAY_MS)).await;
            if STREAM_EPOCH.with(|current| current.get()) != epoch {
                return;
            }
            let on_home = APP_STATE.with(|state| state.borrow().route == AppRoute::Home);
            if on_home {
                open_job_stream();
            }
        });
    }
