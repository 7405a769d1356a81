mod folders_api;
