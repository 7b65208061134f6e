pub mod timing {
    pub mod domain {
        pub mod clock_time;
        pub mod duration_bound;
        pub mod field_options;
        pub mod time_range;
    }
}

pub mod media {
    pub mod domain {
        pub mod audio_file;
        pub mod duration_probe;
    }
    pub mod infrastructure {
        pub mod ffmpeg_duration_probe;
    }
}

pub mod transcription {
    pub mod domain {
        pub mod transcription_client;
    }
    pub mod infrastructure {
        pub mod http_transcription_client;
    }
}

pub mod pipeline {
    pub mod transcribe_clip_use_case;
}

pub mod shared {
    pub mod constants;
    pub mod settings;
}
