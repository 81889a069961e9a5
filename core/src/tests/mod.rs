mod lenia;
